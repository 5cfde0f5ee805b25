use shale::config::Config;
use shale::core::env::OsEnvironment;
use shale::error::ShellError;
use shale::flags::Flags;
use shale::logger;
use shale::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("shale: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<u8, ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(0);
    }

    if flags.is_set("version") {
        println!("shale {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let config = Config::new(&flags, &OsEnvironment::new());
    logger::init(config.log_level)?;

    let mut shell = Shell::new(&config)?;
    shell.run()
}
