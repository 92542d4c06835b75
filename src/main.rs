use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = steam_relink::cli::parse();
    app::run(args)
}
