//! ctxswitch - diagnostic front end for the window core
//!
//! ctxswitch list                  visible windows, most relevant first
//! ctxswitch search <query>        windows ranked against a query
//! ctxswitch activate <hwnd>...    switch to one or more windows
//! ctxswitch context <hwnd>        captured context of a window

use std::process::ExitCode;

use ctxswitch::application::ContextExtractor;
use ctxswitch::domain::value_objects::{SwitchId, WindowHandle};
use ctxswitch::domain::services::{highlight, split_query, ActivitySignals};
use ctxswitch::{log, CompositionRoot};

const USAGE: &str = "usage: ctxswitch list | search <query> | activate <hwnd>... | context <hwnd>";

fn main() -> ExitCode {
    log::init();
    log!("main() starting");

    if cfg!(not(windows)) {
        eprintln!("ctxswitch: window management is only supported on Windows");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let root = CompositionRoot::new();
    match (command.as_str(), rest) {
        ("list", []) => list(&root),
        ("search", query) if !query.is_empty() => search(&root, &query.join(" ")),
        ("activate", handles) if !handles.is_empty() => activate(&root, handles),
        ("context", [handle]) => context(&root, handle),
        _ => {
            eprintln!("{}", USAGE);
            ExitCode::FAILURE
        }
    }
}

fn parse_handle(text: &str) -> Option<WindowHandle> {
    match text.parse::<WindowHandle>() {
        Ok(h) => Some(h),
        Err(e) => {
            eprintln!("invalid window handle '{}': {}", text, e);
            None
        }
    }
}

fn list(root: &CompositionRoot) -> ExitCode {
    let windows = root.registry.enumerate(false);
    let signals = ActivitySignals {
        foreground: root.registry.foreground_window().map(|w| w.handle),
        ..ActivitySignals::default()
    };
    for p in root.priority.rank(&windows, &signals) {
        let marker = if p.is_foreground { '*' } else { ' ' };
        println!(
            "{}{:>12}  {:<24} {}",
            marker,
            p.window.handle.to_string(),
            p.window.process_name,
            p.window.title
        );
    }
    let summary = root.registry.window_summary();
    println!("{} windows", summary.total_windows);
    ExitCode::SUCCESS
}

fn search(root: &CompositionRoot, query: &str) -> ExitCode {
    let windows = root.registry.enumerate(false);
    let keywords = split_query(query);
    for hit in root.search.rank(&windows, query) {
        println!(
            "{:>6}  {:>12}  {}",
            hit.score,
            hit.window.handle.to_string(),
            highlight(&hit.window.title, &keywords)
        );
    }
    ExitCode::SUCCESS
}

fn activate(root: &CompositionRoot, args: &[String]) -> ExitCode {
    let handles: Vec<WindowHandle> = args.iter().filter_map(|a| parse_handle(a)).collect();
    if handles.len() != args.len() {
        return ExitCode::FAILURE;
    }

    let switch_id = SwitchId::generate();
    let results = root
        .switcher
        .activate_many(&handles, root.switcher.default_delay(), &switch_id);
    let mut all_ok = true;
    for handle in &handles {
        let ok = results.get(handle).copied().unwrap_or(false);
        all_ok &= ok;
        println!("{:>12}  {}", handle.to_string(), if ok { "activated" } else { "failed" });
    }
    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn context(root: &CompositionRoot, arg: &str) -> ExitCode {
    let Some(handle) = parse_handle(arg) else {
        return ExitCode::FAILURE;
    };
    let Some(info) = root.registry.get_info(handle) else {
        eprintln!("no window {}", handle);
        return ExitCode::FAILURE;
    };

    let ctx = root
        .extractors
        .extract_context(handle, &info.title, &info.process_name);
    let restorable = root.extractors.get(ctx.app_type).can_restore(&ctx);
    println!("window:            {} '{}' ({})", handle, info.title, info.process_name);
    println!("app type:          {}", ctx.app_type);
    println!("working directory: {}", ctx.working_directory.as_deref().unwrap_or("-"));
    println!("terminal profile:  {}", ctx.terminal_profile.as_deref().unwrap_or("-"));
    println!("folder path:       {}", ctx.folder_path.as_deref().unwrap_or("-"));
    println!("restorable:        {}", restorable);
    ExitCode::SUCCESS
}
