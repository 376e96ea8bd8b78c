use clap::Parser;
use log::{debug, LevelFilter};

mod args;
mod roster;

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::builder().filter_level(LevelFilter::Debug).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
    debug!("args: {:?}", args);

    let res = roster::run(&args);

    if let Err(e) = res {
        let mut last = e.to_string();
        eprintln!("❌ {}", last);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            // Some errors only forward the message of their cause.
            let msg = cause.to_string();
            if msg != last {
                eprintln!("   {}", msg);
            }
            last = msg;
            source = cause.source();
        }
        std::process::exit(1);
    }
}
