use anyhow::Result;
use scoutdesk::cli;
use scoutdesk::context::{AppContext, StandardContext};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        cli::print_help("scout");
        return Ok(());
    }

    let root = parse_root(&args);
    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(root));
    init_logging(ctx.as_ref(), "scout");

    scoutdesk::tui::scout::run(ctx).await
}

fn parse_root(args: &[String]) -> Option<PathBuf> {
    let pos = args.iter().position(|a| a == "--root" || a == "-r")?;
    args.get(pos + 1).map(PathBuf::from)
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
