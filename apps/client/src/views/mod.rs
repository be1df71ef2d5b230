// Feature views: each owns its form and result state and talks to the backend
// only through `ApiClient`. Views are created once and live as long as the shell.

pub mod analysis;
pub mod chat;
pub mod jd_management;

/// Result of one user action on a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded and state was updated.
    Done,
    /// The action was disabled or declined; no request was issued.
    Skipped,
    /// The request failed; the user was notified and state was left as it was.
    Failed,
}

/// The five top-level tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    JdManagement,
    ResumeToJds,
    JdsToResumes,
    Interview,
    AiChat,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::JdManagement,
        Tab::ResumeToJds,
        Tab::JdsToResumes,
        Tab::Interview,
        Tab::AiChat,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Tab::JdManagement => "jd-management",
            Tab::ResumeToJds => "resume-to-jds",
            Tab::JdsToResumes => "jds-to-resumes",
            Tab::Interview => "interview",
            Tab::AiChat => "ai-chat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::JdManagement => "📋 JD Management",
            Tab::ResumeToJds => "📊 Resume → JDs",
            Tab::JdsToResumes => "📄 JDs → Resumes",
            Tab::Interview => "💬 Interview",
            Tab::AiChat => "🤖 AI Assistant",
        }
    }

    /// Tabs without a view render a placeholder card.
    pub fn is_implemented(&self) -> bool {
        !matches!(self, Tab::JdsToResumes | Tab::Interview)
    }

    /// Accepts a tab key or its 1-based position.
    pub fn parse(input: &str) -> Option<Tab> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Tab::ALL.get(i).copied());
        }
        Tab::ALL.into_iter().find(|t| t.key() == input)
    }
}

pub const PLACEHOLDER: &str = "Content for this tab is coming soon!";
