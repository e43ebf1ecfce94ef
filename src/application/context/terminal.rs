//! Terminal extractor - Windows Terminal, PowerShell, cmd, Git Bash, WSL
//!
//! Shells put the working directory in the window title. Titles are parsed
//! against an ordered pattern set; extracted paths count only if they exist.

use std::path::Path;
use std::sync::Arc;

use regex::Regex;

use super::paths::mingw_to_windows;
use super::{
    average, directory_match_score, ContextExtractor, ExtractorEnv, LaunchPlan, ProjectLocator,
};
use crate::application::ports::LaunchCommand;
use crate::domain::entities::{AppContext, WindowSnapshot};
use crate::domain::value_objects::app_type::TERMINAL_PROCESSES;
use crate::domain::value_objects::{AppType, WindowHandle};

/// Shell names as written in titles -> terminal profile names
const PROFILE_NAMES: &[(&str, &str)] = &[
    ("windows powershell", "Windows PowerShell"),
    ("powershell", "PowerShell"),
    ("pwsh", "PowerShell"),
    ("cmd", "Command Prompt"),
    ("command prompt", "Command Prompt"),
    ("git bash", "Git Bash"),
    ("bash", "Git Bash"),
    ("ubuntu", "Ubuntu"),
    ("wsl", "Ubuntu"),
];

/// Title substrings -> profile, checked in order when no pattern names one
const PROFILE_HINTS: &[(&str, &str)] = &[
    ("windows powershell", "Windows PowerShell"),
    ("powershell", "Windows PowerShell"),
    ("pwsh", "PowerShell"),
    ("command prompt", "Command Prompt"),
    ("cmd", "Command Prompt"),
    ("mingw", "Git Bash"),
    ("bash", "Git Bash"),
    ("ubuntu", "Ubuntu"),
    ("wsl", "Ubuntu"),
];

/// Shell the fallback launcher starts unless cmd was asked for
const DEFAULT_SHELL: &str = "powershell.exe";

/// What a title says, before checking the filesystem
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TitleInfo {
    pub directory: Option<String>,
    pub profile: Option<String>,
    /// Bare project name ("Terminal - ctxswitch")
    pub project_name: Option<String>,
}

/// Ordered terminal title patterns
pub struct TerminalTitleParser {
    path_and_shell: Option<Regex>,
    bare_path: Option<Regex>,
    mingw: Option<Regex>,
    named: Option<Regex>,
}

impl Default for TerminalTitleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalTitleParser {
    pub fn new() -> Self {
        let admin = r"(?:(?:管理员|Administrator):\s*)?";
        Self {
            path_and_shell: Regex::new(&format!(
                r"(?i)^{}(.+?)\s*-\s*(Windows PowerShell|PowerShell|pwsh|cmd)$",
                admin
            ))
            .ok(),
            bare_path: Regex::new(&format!(r#"(?i)^{}([A-Za-z]:\\[^<>:"|?*]+)$"#, admin)).ok(),
            mingw: Regex::new(r"(?i)^MINGW\d*:(.+)$").ok(),
            named: Regex::new(r"(?i)^Terminal\s*-\s*(.+)$").ok(),
        }
    }

    /// First matching pattern wins; profile falls back to title hints
    pub fn parse(&self, title: &str) -> TitleInfo {
        let title = title.trim();
        let mut info = self.parse_patterns(title);
        if info.profile.is_none() {
            info.profile = infer_profile(title).map(str::to_string);
        }
        info
    }

    fn parse_patterns(&self, title: &str) -> TitleInfo {
        if let Some(caps) = capture(&self.path_and_shell, title) {
            return TitleInfo {
                directory: caps.get(1).map(|m| m.as_str().trim().to_string()),
                profile: caps.get(2).map(|m| display_profile(m.as_str())),
                project_name: None,
            };
        }
        if let Some(caps) = capture(&self.bare_path, title) {
            return TitleInfo {
                directory: caps.get(1).map(|m| m.as_str().trim().to_string()),
                ..TitleInfo::default()
            };
        }
        if let Some(caps) = capture(&self.mingw, title) {
            return TitleInfo {
                directory: caps.get(1).and_then(|m| mingw_to_windows(m.as_str())),
                profile: Some("Git Bash".to_string()),
                project_name: None,
            };
        }
        if let Some(caps) = capture(&self.named, title) {
            return TitleInfo {
                project_name: caps.get(1).map(|m| m.as_str().trim().to_string()),
                ..TitleInfo::default()
            };
        }
        TitleInfo::default()
    }
}

fn capture<'t>(pattern: &Option<Regex>, title: &'t str) -> Option<regex::Captures<'t>> {
    pattern.as_ref()?.captures(title)
}

/// Profile display name for a shell name; unknown names are title-cased
pub fn display_profile(shell: &str) -> String {
    let key = shell.trim().to_lowercase();
    PROFILE_NAMES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, profile)| profile.to_string())
        .unwrap_or_else(|| title_case(shell.trim()))
}

/// Profile suggested by well-known substrings of the title
pub fn infer_profile(title: &str) -> Option<&'static str> {
    let lower = title.to_lowercase();
    PROFILE_HINTS
        .iter()
        .find(|(hint, _)| lower.contains(hint))
        .map(|(_, profile)| *profile)
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub struct TerminalExtractor {
    env: Arc<ExtractorEnv>,
    parser: TerminalTitleParser,
    locator: ProjectLocator,
}

impl TerminalExtractor {
    pub fn new(env: Arc<ExtractorEnv>) -> Self {
        let locator = ProjectLocator::new(env.fs.clone());
        Self {
            env,
            parser: TerminalTitleParser::new(),
            locator,
        }
    }

    /// Builder: replace the project locator
    pub fn with_locator(mut self, locator: ProjectLocator) -> Self {
        self.locator = locator;
        self
    }

    fn existing_dir(&self, dir: &str) -> bool {
        self.env.fs.is_dir(Path::new(dir))
    }
}

impl ContextExtractor for TerminalExtractor {
    fn app_type(&self) -> AppType {
        AppType::Terminal
    }

    fn process_names(&self) -> &'static [&'static str] {
        TERMINAL_PROCESSES
    }

    fn env(&self) -> &ExtractorEnv {
        &self.env
    }

    fn extract_context(&self, _handle: WindowHandle, title: &str) -> AppContext {
        let info = self.parser.parse(title);
        let mut ctx = AppContext::empty(AppType::Terminal);

        ctx.working_directory = match (info.directory, info.project_name) {
            (Some(dir), _) if self.existing_dir(&dir) => Some(dir),
            (Some(dir), _) => {
                log!("Terminal title path does not exist: {}", dir);
                None
            }
            (None, Some(name)) => self
                .locator
                .resolve(&name)
                .map(|p| p.to_string_lossy().into_owned()),
            (None, None) => None,
        };
        ctx.terminal_profile = info.profile;
        ctx
    }

    fn can_restore(&self, _context: &AppContext) -> bool {
        // A plain shell is a useful restore even without a directory
        true
    }

    fn launch_plan(&self, context: &AppContext) -> Option<LaunchPlan> {
        let dir = context
            .working_directory
            .as_deref()
            .filter(|d| self.existing_dir(d));
        let profile = context.terminal_profile.as_deref();

        let mut wt = LaunchCommand::new("wt.exe");
        if let Some(profile) = profile {
            wt = wt.arg("-p").arg(profile);
        }
        if let Some(dir) = dir {
            wt = wt.arg("-d").arg(dir);
        }

        let wants_cmd = profile
            .map(|p| {
                let p = p.to_lowercase();
                p.contains("cmd") || p.contains("command")
            })
            .unwrap_or(false);
        let fallback = if wants_cmd {
            let cmd = LaunchCommand::new("cmd.exe").arg("/K");
            match dir {
                Some(dir) => cmd.arg("cd").arg("/d").arg(dir),
                None => cmd,
            }
        } else {
            let shell = LaunchCommand::new(DEFAULT_SHELL).arg("-NoExit");
            match dir {
                Some(dir) => shell.arg("-Command").arg(format!(
                    "Set-Location -LiteralPath '{}'",
                    dir.replace('\'', "''")
                )),
                None => shell,
            }
        };

        Some(LaunchPlan::new(wt).or_else(fallback))
    }

    fn match_score(&self, window: &WindowSnapshot, context: &AppContext) -> f64 {
        let title = window.title.to_lowercase();
        let dir = directory_match_score(&window.title, context.working_directory.as_deref());
        let profile = context
            .terminal_profile
            .as_deref()
            .map(|p| if title.contains(&p.to_lowercase()) { 1.0 } else { 0.0 });
        average(&[dir, profile])
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::harness;
    use super::*;
    use crate::application::ports::fakes::{FakeFileSystem, FakeProcessPort};
    use crate::domain::value_objects::Rect;
    use crate::infrastructure::filesystem::StdFileSystem;

    fn extractor(fs: FakeFileSystem) -> TerminalExtractor {
        let h = harness(fs, FakeProcessPort::default());
        TerminalExtractor::new(h.env)
    }

    #[test]
    fn test_parse_path_and_shell() {
        let parser = TerminalTitleParser::new();
        for title in [
            r"C:\Users\Dev - PowerShell",
            r"管理员: C:\Users\Dev - PowerShell",
            r"Administrator: C:\Users\Dev - PowerShell",
        ] {
            let info = parser.parse(title);
            assert_eq!(info.directory.as_deref(), Some(r"C:\Users\Dev"), "{}", title);
            assert_eq!(info.profile.as_deref(), Some("PowerShell"), "{}", title);
        }

        let info = parser.parse(r"D:\work - Windows PowerShell");
        assert_eq!(info.profile.as_deref(), Some("Windows PowerShell"));
        let info = parser.parse(r"D:\work - cmd");
        assert_eq!(info.profile.as_deref(), Some("Command Prompt"));
    }

    #[test]
    fn test_parse_other_forms() {
        let parser = TerminalTitleParser::new();

        let bare = parser.parse(r"C:\Windows\System32");
        assert_eq!(bare.directory.as_deref(), Some(r"C:\Windows\System32"));
        assert_eq!(bare.profile, None);

        let mingw = parser.parse("MINGW64:/c/Users/Dev/src");
        assert_eq!(mingw.directory.as_deref(), Some(r"C:\Users\Dev\src"));
        assert_eq!(mingw.profile.as_deref(), Some("Git Bash"));

        let named = parser.parse("Terminal - ctxswitch");
        assert_eq!(named.project_name.as_deref(), Some("ctxswitch"));
    }

    #[test]
    fn test_profile_inference_and_display() {
        let parser = TerminalTitleParser::new();
        assert_eq!(
            parser.parse("Administrator: Command Prompt").profile.as_deref(),
            Some("Command Prompt")
        );
        assert_eq!(parser.parse("pwsh in ~").profile.as_deref(), Some("PowerShell"));
        assert_eq!(display_profile("WSL"), "Ubuntu");
        assert_eq!(display_profile("nushell"), "Nushell");
        assert_eq!(display_profile("fish shell"), "Fish Shell");
    }

    #[test]
    fn test_extract_requires_existing_directory() {
        let terminal = extractor(FakeFileSystem::default().with_dir(r"C:\Users\Dev"));

        let ctx = terminal.extract_context(WindowHandle(1), r"管理员: C:\Users\Dev - PowerShell");
        assert_eq!(ctx.working_directory.as_deref(), Some(r"C:\Users\Dev"));
        assert_eq!(ctx.terminal_profile.as_deref(), Some("PowerShell"));

        let gone = terminal.extract_context(WindowHandle(1), r"C:\Old\Place - PowerShell");
        assert_eq!(gone.working_directory, None);
        assert_eq!(gone.terminal_profile.as_deref(), Some("PowerShell"));
    }

    #[test]
    fn test_unparseable_title_gives_empty_context() {
        let terminal = extractor(FakeFileSystem::default());
        let ctx = terminal.extract_context(WindowHandle(1), "htop - load 0.42");

        assert!(ctx.is_empty());
        assert_eq!(ctx.app_type, AppType::Terminal);
        assert!(terminal.can_restore(&ctx));
    }

    #[test]
    fn test_launch_plan_uses_profile_and_directory() {
        let terminal = extractor(FakeFileSystem::default().with_dir(r"C:\My Dir"));
        let ctx = AppContext::empty(AppType::Terminal)
            .with_working_directory(r"C:\My Dir")
            .with_terminal_profile("PowerShell");

        let plan = terminal.launch_plan(&ctx).unwrap();
        assert_eq!(plan.primary.program, "wt.exe");
        assert_eq!(plan.primary.args, vec!["-p", "PowerShell", "-d", r"C:\My Dir"]);
        let fallback = plan.fallback.unwrap();
        assert_eq!(fallback.program, "powershell.exe");
        assert_eq!(
            fallback.args,
            vec!["-NoExit", "-Command", r"Set-Location -LiteralPath 'C:\My Dir'"]
        );
    }

    #[test]
    fn test_launch_plan_cmd_fallback_and_missing_dir() {
        let terminal = extractor(FakeFileSystem::default().with_dir(r"C:\src"));
        let cmd = AppContext::empty(AppType::Terminal)
            .with_working_directory(r"C:\src")
            .with_terminal_profile("Command Prompt");
        let fallback = terminal.launch_plan(&cmd).unwrap().fallback.unwrap();
        assert_eq!(fallback.program, "cmd.exe");
        assert_eq!(fallback.args, vec!["/K", "cd", "/d", r"C:\src"]);

        let missing = AppContext::empty(AppType::Terminal).with_working_directory(r"C:\gone");
        let plan = terminal.launch_plan(&missing).unwrap();
        assert!(plan.primary.args.is_empty());
        assert_eq!(plan.fallback.unwrap().args, vec!["-NoExit"]);
    }

    #[test]
    fn test_match_score() {
        let terminal = extractor(FakeFileSystem::default());
        let ctx = AppContext::empty(AppType::Terminal)
            .with_working_directory(r"C:\Users\Dev")
            .with_terminal_profile("PowerShell");
        let window = |title: &str| WindowSnapshot::new(WindowHandle(1), title, "WindowsTerminal.exe");

        assert_eq!(terminal.match_score(&window(r"C:\Users\Dev - PowerShell"), &ctx), 1.0);
        assert_eq!(terminal.match_score(&window("Dev"), &ctx), 0.35);
        assert_eq!(terminal.match_score(&window("Ubuntu"), &ctx), 0.0);
    }

    fn terminal_window(handle: isize, title: &str) -> WindowSnapshot {
        WindowSnapshot::new(WindowHandle(handle), title, "WindowsTerminal.exe")
            .with_class("CASCADIA_HOSTING_WINDOW_CLASS")
            .with_pid(31)
    }

    #[test]
    fn test_restore_leaves_open_windows_alone() {
        let h = harness(FakeFileSystem::default(), FakeProcessPort::default());
        h.windows.state.lock().work_area = Some(Rect::new(0, 0, 1920, 1040));
        h.windows.open_window(terminal_window(0x77, "ssh prod-db"));
        let terminal = TerminalExtractor::new(h.env.clone());

        // The launch starts nothing new
        let ctx = AppContext::empty(AppType::Terminal);
        let restored = terminal.restore_window(&ctx, Some(Rect::new(0, 0, 800, 600)));

        assert_eq!(restored, None);
        assert_eq!(h.launcher.launched().len(), 1);
        let s = h.windows.state.lock();
        assert!(s.maximized.is_empty());
        assert!(s.moved.is_empty());
    }

    #[test]
    fn test_unmatched_restore_picks_the_new_window() {
        let h = harness(FakeFileSystem::default(), FakeProcessPort::default());
        h.windows.open_window(terminal_window(0x77, "ssh prod-db"));
        let windows = h.windows.clone();
        h.launcher.on_spawn(move || {
            // Opens behind the window the user is looking at
            windows
                .state
                .lock()
                .windows
                .push(terminal_window(0x78, "Windows PowerShell"));
        });
        let terminal = TerminalExtractor::new(h.env.clone());

        let restored = terminal.restore_window(&AppContext::empty(AppType::Terminal), None);
        assert_eq!(restored, Some(WindowHandle(0x78)));
    }

    #[test]
    fn test_named_terminal_resolves_project() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("Projects").join("ctxswitch");
        std::fs::create_dir_all(project.join(".git")).unwrap();

        let h = harness(StdFileSystem::new().with_home(tmp.path()), FakeProcessPort::default());
        let terminal = TerminalExtractor::new(h.env.clone())
            .with_locator(ProjectLocator::new(h.env.fs.clone()).with_drive_roots(Vec::new()));

        let ctx = terminal.extract_context(WindowHandle(4), "Terminal - ctxswitch");
        assert_eq!(
            ctx.working_directory.as_deref(),
            Some(project.to_string_lossy().as_ref())
        );
    }
}
