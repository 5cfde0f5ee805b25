use std::env;
use std::fs;

use shale::config::Config;
use shale::core::env::{Environment, OsEnvironment, OLDPWD, PWD};
use shale::error::ShellError;
use shale::input::ScriptedReader;
use shale::process::ForkExecLauncher;
use shale::prompt::Prompt;
use shale::shell::{Console, Shell};

// Only test in this binary that moves the working directory.
#[test]
fn test_cd_and_launch_against_the_os() -> Result<(), ShellError> {
    let base = env::temp_dir().join(format!("shale_os_session_{}", std::process::id()));
    let nested = base.join("a").join("b");
    fs::create_dir_all(&nested)?;
    let base = fs::canonicalize(&base)?.to_string_lossy().into_owned();

    let (console, _, err) = Console::buffered();
    let reader = ScriptedReader::new([
        format!("cd {}", base),
        "cd a/b".to_string(),
        "true".to_string(),
        "cd does-not-exist".to_string(),
        "exit".to_string(),
    ]);
    let mut shell = Shell::with_parts(
        reader,
        OsEnvironment::new(),
        ForkExecLauncher::new(),
        console,
        Prompt::plain(),
        &Config::default(),
    );

    assert_eq!(shell.run()?, 0);

    let expected = format!("{}/a/b", base);
    assert_eq!(shell.env().var(PWD), Some(expected.clone()));
    assert_eq!(shell.env().var(OLDPWD), Some(base.clone()));
    assert_eq!(env::current_dir()?, fs::canonicalize(&nested)?);
    assert!(err.contents().contains("cd: "));
    assert!(err.contents().contains("does-not-exist"));

    fs::remove_dir_all(&base)?;
    Ok(())
}
