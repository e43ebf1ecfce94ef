//! VS Code extractor
//!
//! The editor's own working directory is the most reliable source: it is
//! read from the live process when the platform allows it. Otherwise the
//! window title names a file and/or project, which is resolved on disk.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;

use super::paths::{basename, is_absolute_windows, parent};
use super::{average, ContextExtractor, ExtractorEnv, LaunchPlan, ProjectLocator};
use crate::application::ports::LaunchCommand;
use crate::domain::entities::{AppContext, WindowSnapshot};
use crate::domain::value_objects::app_type::VSCODE_PROCESSES;
use crate::domain::value_objects::{AppType, WindowHandle};

const APP_NAME: &str = "visual studio code";

/// Unsaved-changes marker VS Code prefixes to titles
const DIRTY_MARKER: char = '●';

/// Fragments of the editor's own install location
const INSTALL_DIR_HINTS: &[&str] = &["microsoft vs code", "visual studio code"];

/// What a title names, in order of specificity
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TitleTarget {
    /// Absolute path of the open file or folder
    Path(String),
    /// Workspace or folder name
    Project(String),
    /// Nothing open
    Empty,
}

pub struct VsCodeTitleParser {
    file_and_project: Option<Regex>,
    full_path: Option<Regex>,
    project: Option<Regex>,
}

impl Default for VsCodeTitleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl VsCodeTitleParser {
    pub fn new() -> Self {
        Self {
            file_and_project: Regex::new(r"(?i)^.+?\s+-\s+(.+?)\s+-\s+Visual Studio Code$").ok(),
            full_path: Regex::new(r#"(?i)^([A-Za-z]:\\[^<>:"|?*]+?)\s+-\s+Visual Studio Code$"#).ok(),
            project: Regex::new(r"(?i)^(.+?)\s+-\s+Visual Studio Code$").ok(),
        }
    }

    pub fn parse(&self, title: &str) -> Option<TitleTarget> {
        let title = title.trim().trim_start_matches(DIRTY_MARKER).trim();
        if title.eq_ignore_ascii_case("Visual Studio Code") {
            return Some(TitleTarget::Empty);
        }

        let group = |re: &Option<Regex>| -> Option<String> {
            re.as_ref()?
                .captures(title)?
                .get(1)
                .map(|m| m.as_str().trim().to_string())
        };

        if let Some(project) = group(&self.file_and_project) {
            return Some(classify(project));
        }
        if let Some(path) = group(&self.full_path) {
            return Some(TitleTarget::Path(path));
        }
        group(&self.project).map(classify)
    }
}

fn classify(name: String) -> TitleTarget {
    if is_absolute_windows(&name) {
        TitleTarget::Path(name)
    } else {
        TitleTarget::Project(name)
    }
}

pub struct VsCodeExtractor {
    env: Arc<ExtractorEnv>,
    parser: VsCodeTitleParser,
    locator: ProjectLocator,
}

impl VsCodeExtractor {
    pub fn new(env: Arc<ExtractorEnv>) -> Self {
        let locator = ProjectLocator::new(env.fs.clone());
        Self {
            env,
            parser: VsCodeTitleParser::new(),
            locator,
        }
    }

    /// Builder: replace the project locator
    pub fn with_locator(mut self, locator: ProjectLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Live working directory of the editor process, if readable and not
    /// the editor's install directory
    fn process_directory(&self, handle: WindowHandle) -> Option<String> {
        let pid = self.env.registry.get_info(handle)?.process_id;
        if pid == 0 {
            return None;
        }
        let cwd = self.env.process.process_cwd(pid)?;
        let cwd = cwd.trim_end_matches(['\\', '/']).to_string();
        if self.is_install_dir(&cwd) {
            log!("Ignoring VS Code install dir as cwd: {}", cwd);
            return None;
        }
        self.env.fs.is_dir(Path::new(&cwd)).then_some(cwd)
    }

    fn is_install_dir(&self, dir: &str) -> bool {
        let lower = dir.to_lowercase();
        INSTALL_DIR_HINTS.iter().any(|hint| lower.contains(hint))
            || self.env.fs.exists(&Path::new(dir).join("Code.exe"))
    }

    fn title_directory(&self, title: &str) -> Option<String> {
        match self.parser.parse(title)? {
            TitleTarget::Path(path) => {
                if self.env.fs.is_dir(Path::new(&path)) {
                    Some(path)
                } else if self.env.fs.is_file(Path::new(&path)) {
                    parent(&path).map(str::to_string)
                } else {
                    None
                }
            }
            TitleTarget::Project(name) => self
                .locator
                .resolve(&name)
                .map(|p| p.to_string_lossy().into_owned()),
            TitleTarget::Empty => None,
        }
    }
}

impl ContextExtractor for VsCodeExtractor {
    fn app_type(&self) -> AppType {
        AppType::VsCode
    }

    fn process_names(&self) -> &'static [&'static str] {
        VSCODE_PROCESSES
    }

    fn env(&self) -> &ExtractorEnv {
        &self.env
    }

    fn extract_context(&self, handle: WindowHandle, title: &str) -> AppContext {
        let ctx = AppContext::empty(AppType::VsCode);
        let dir = self
            .process_directory(handle)
            .or_else(|| self.title_directory(title));
        match dir {
            Some(dir) => ctx.with_working_directory(dir),
            None => ctx,
        }
    }

    fn can_restore(&self, context: &AppContext) -> bool {
        context.working_directory.as_deref().is_some_and(|d| !d.is_empty())
    }

    fn launch_plan(&self, context: &AppContext) -> Option<LaunchPlan> {
        let dir = context
            .working_directory
            .as_deref()
            .filter(|d| self.env.fs.is_dir(Path::new(d)))?;

        // `code` is a batch shim, so it needs cmd
        let plan = LaunchPlan::new(
            LaunchCommand::new("cmd.exe")
                .arg("/C")
                .arg("code")
                .arg("-n")
                .arg(dir)
                .hidden(),
        );
        let user_install = dirs::data_local_dir()
            .map(|d| d.join("Programs").join("Microsoft VS Code").join("Code.exe"));
        Some(match user_install {
            Some(exe) => plan.or_else(
                LaunchCommand::new(exe.to_string_lossy())
                    .arg("-n")
                    .arg(dir),
            ),
            None => plan,
        })
    }

    fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.env.restore.editor_settle_ms)
    }

    fn rediscovery_timeout(&self) -> Duration {
        Duration::from_millis(self.env.restore.editor_rediscovery_timeout_ms)
    }

    fn match_score(&self, window: &WindowSnapshot, context: &AppContext) -> f64 {
        let title = window.title.to_lowercase();
        let dir = context
            .working_directory
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|dir| {
                let name = basename(dir).to_lowercase();
                if title.contains(&dir.to_lowercase()) {
                    1.0
                } else if !name.is_empty() && title.contains(&name) {
                    0.8
                } else {
                    0.0
                }
            });
        let app = Some(if title.contains(APP_NAME) { 1.0 } else { 0.0 });
        average(&[dir, app])
    }
}
