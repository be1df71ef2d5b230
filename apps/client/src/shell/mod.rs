//! Top-level shell: owns the page state and every view, gates the UI on the
//! session bootstrap, and routes commands to the active view.

pub mod commands;

use anyhow::Result;
use tracing::{info, warn};

use crate::api_client::ApiClient;
use crate::bootstrap::{bootstrap, BootState};
use crate::prompter::{Prompter, TerminalPrompter};
use crate::state::AppState;
use crate::upload::SelectedFile;
use crate::views::analysis::ResumeAnalysis;
use crate::views::chat::Chat;
use crate::views::jd_management::JdManagement;
use crate::views::{Outcome, Tab, PLACEHOLDER};

use self::commands::{Command, HELP};

pub const HEADER: &str = "🚀 TalentSync AI";
pub const INITIALIZING: &str = "Initializing session with the backend...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    client: ApiClient,
    state: AppState,
    boot: BootState,
    started: bool,
    active: Tab,
    jd_management: JdManagement,
    analysis: ResumeAnalysis,
    chat: Chat,
}

impl Shell {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: AppState::new(),
            boot: BootState::Initializing,
            started: false,
            active: Tab::default(),
            jd_management: JdManagement::new(),
            analysis: ResumeAnalysis::new(),
            chat: Chat::new(),
        }
    }

    /// Runs the session bootstrap. Only the first call does anything.
    pub async fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.boot = match bootstrap(&self.client).await {
            Ok(booted) => match self.state.adopt_session(booted.session) {
                Ok(()) => {
                    self.state.jds = booted.jds;
                    BootState::Ready
                }
                Err(e) => BootState::Failed(e.to_string()),
            },
            Err(e) => BootState::Failed(e.to_string()),
        };
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// Applies one command. Until the bootstrap succeeded only `help`, `show`
    /// and `quit` are honoured.
    pub async fn handle(&mut self, command: Command, prompter: &mut dyn Prompter) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => prompter.alert(HELP).await,
            Command::Show => {}
            _ if self.boot != BootState::Ready => {
                warn!("Ignoring {command:?}: session not ready");
            }
            command => self.dispatch(command, prompter).await,
        }
        Flow::Continue
    }

    async fn dispatch(&mut self, command: Command, prompter: &mut dyn Prompter) {
        match command {
            Command::Tab(tab) => {
                info!("Switching to tab {}", tab.key());
                self.active = tab;
            }
            Command::Mode(mode) => self.jd_management.mode = mode,
            Command::Title(title) => self.jd_management.title = title,
            Command::Content(content) => self.jd_management.content = content,
            Command::Url(url) => self.jd_management.url = url,
            Command::File(path) => match SelectedFile::load(&path).await {
                Ok(file) => self.jd_management.select_file(file),
                Err(e) => prompter.alert(&format!("Error: {e}")).await,
            },
            Command::Save => {
                self.jd_management
                    .save(&self.client, &mut self.state.jds, prompter)
                    .await;
            }
            Command::Delete(label) => {
                let Some(id) = self.state.jds.find_by_label(&label).map(|jd| jd.id.clone()) else {
                    prompter.alert(&format!("No job description with id {label}")).await;
                    return;
                };
                let outcome = self
                    .jd_management
                    .delete(&id, &self.client, &mut self.state.jds, prompter)
                    .await;
                if outcome == Outcome::Done {
                    self.analysis.retain_known(&self.state.jds);
                }
            }
            Command::Resume(path) => match SelectedFile::load(&path).await {
                Ok(file) => self.analysis.select_resume(file),
                Err(e) => prompter.alert(&format!("Error: {e}")).await,
            },
            Command::Select(label) => match self.state.jds.find_by_label(&label) {
                Some(jd) => self.analysis.toggle(jd.id.clone()),
                None => prompter.alert(&format!("No job description with id {label}")).await,
            },
            Command::Analyze => {
                self.analysis
                    .analyze(&self.client, self.state.session(), prompter)
                    .await;
            }
            Command::ChatMode(mode) => {
                info!("Chat mode set to {}", mode.wire_name());
                self.chat.set_mode(mode);
            }
            Command::Ask(question) => {
                self.chat.input = question;
                self.chat.send(&self.client, self.state.session()).await;
            }
            Command::Show | Command::Help | Command::Quit => {}
        }
    }

    pub fn render(&self) -> String {
        let mut out = vec![HEADER.to_string(), String::new()];

        match &self.boot {
            BootState::Failed(message) => {
                out.push("== ⚠ Connection Error ==".to_string());
                out.push(message.clone());
            }
            BootState::Initializing => out.push(INITIALIZING.to_string()),
            BootState::Ready => {
                out.push(self.render_tab_bar());
                out.push(String::new());
                out.push(self.render_active());
            }
        }

        out.join("\n")
    }

    fn render_tab_bar(&self) -> String {
        Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if *tab == self.active {
                    format!("{} [{}]", i + 1, tab.label())
                } else {
                    format!("{}  {} ", i + 1, tab.label())
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn render_active(&self) -> String {
        let session = self.state.session();
        match self.active {
            Tab::JdManagement => self.jd_management.render(&self.state.jds),
            Tab::ResumeToJds => self.analysis.render(&self.state.jds, session),
            Tab::AiChat => self.chat.render(),
            Tab::JdsToResumes | Tab::Interview => PLACEHOLDER.to_string(),
        }
    }
}

#[cfg(test)]
impl Shell {
    pub fn boot_state(&self) -> &BootState {
        &self.boot
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn jd_management(&self) -> &JdManagement {
        &self.jd_management
    }

    pub fn analysis(&self) -> &ResumeAnalysis {
        &self.analysis
    }

    pub fn chat(&self) -> &Chat {
        &self.chat
    }
}

/// Interactive loop: render, read a command, apply it, repeat until `quit` or EOF.
pub async fn run(mut shell: Shell, terminal: &mut TerminalPrompter) -> Result<()> {
    terminal.write(&format!("{INITIALIZING}\n")).await?;
    shell.start().await;
    terminal.write(&format!("{}\n", shell.render())).await?;

    loop {
        terminal.write("\n> ").await?;
        let Some(line) = terminal.read_line().await? else {
            break;
        };

        let command = match Command::parse(&line, shell.active_tab()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                terminal.alert(&e.to_string()).await;
                continue;
            }
        };

        if shell.handle(command, terminal).await == Flow::Quit {
            break;
        }
        terminal.write(&format!("{}\n", shell.render())).await?;
    }

    info!("Shell closed");
    Ok(())
}
