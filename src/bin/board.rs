use anyhow::Result;
use scoutdesk::cli;
use scoutdesk::context::{AppContext, StandardContext};
use scoutdesk::storage::LocalStorage;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        cli::print_help("board");
        return Ok(());
    }

    let root = parse_root(&args);
    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(root));
    init_logging(ctx.as_ref(), "board");

    // Positional arguments with --root/-r and its value stripped out, so
    // 'board --root x export' and 'board export' behave the same.
    let positional = strip_flags(&args);

    // CLI command: board export
    if positional.first().map(String::as_str) == Some("export") {
        let items = LocalStorage::load(ctx.as_ref())?;
        println!("{}", LocalStorage::export_string(&items)?);
        return Ok(());
    }

    // CLI command: board import <file.json>
    if positional.first().map(String::as_str) == Some("import") {
        let Some(file) = positional.get(1) else {
            eprintln!("Usage: board import <file.json>");
            std::process::exit(2);
        };
        let content = std::fs::read_to_string(file)?;
        match LocalStorage::import_from_str(&content) {
            Ok(imported) => {
                let existing = LocalStorage::load(ctx.as_ref())?;
                let (merged, count) = LocalStorage::merge_import(&existing, imported);
                LocalStorage::save(ctx.as_ref(), &merged)?;
                println!("Imported {} items ({} total).", count, merged.len());
            }
            Err(e) => {
                // The stored board is untouched on rejection.
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Normal TUI startup
    scoutdesk::tui::board::run(ctx)
}

fn parse_root(args: &[String]) -> Option<PathBuf> {
    let pos = args.iter().position(|a| a == "--root" || a == "-r")?;
    args.get(pos + 1).map(PathBuf::from)
}

fn strip_flags(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--root" || arg == "-r" {
            skip_next = true;
            continue;
        }
        out.push(arg.clone());
    }
    out
}

fn init_logging(ctx: &dyn AppContext, binary_name: &str) {
    if let Some(path) = ctx.get_log_path(binary_name)
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = simplelog::WriteLogger::init(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            file,
        );
    }
}
