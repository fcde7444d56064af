use anyhow::Result;
use clap::Parser;
use sv_cli::driver::{add_sources, format_diagnostic, should_report};
use sv_cli::CliArgs;
use sv_compilation::Compilation;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "sv_elab=info,warn".to_string()))
        .init();

    let args = CliArgs::parse();
    let mut compilation = Compilation::default();
    add_sources(&mut compilation, &args.files)?;

    compilation
        .get_root()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    for diagnostic in compilation.get_all_diagnostics() {
        if should_report(&diagnostic, args.errors_only) {
            println!("{}", format_diagnostic(&diagnostic));
        }
    }

    if args.list_top {
        for &instance in compilation.top_level_instances() {
            if let Some(symbol) = compilation.symbols().symbol(instance) {
                println!("top-level instance: {}", symbol.name);
            }
        }
    }

    Ok(())
}
