use std::env;

use docs_builder::build;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();

    let name = &args[0];
    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        println!("{}", help(name));
        return Ok(());
    }
    if args.len() > 2 {
        anyhow::bail!(help(name));
    }

    let src_dir = args.get(1).map_or(".", String::as_str);

    build(src_dir)?;

    log::info!("done");
    Ok(())
}

fn help(name: &str) -> String {
    format!("Usage: {} [src-dir]", name)
}
