use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = consolidate::cli::parse();
    app::run(args)
}
