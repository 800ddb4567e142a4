use hilo_cli::exit_code::{ERROR, INTERRUPTED, SUCCESS};
use hilo_cli::run;

fn code_of(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn constants() {
    assert_eq!((SUCCESS, ERROR, INTERRUPTED), (0, 2, 130));
}

#[test]
fn help_and_version_succeed_on_stdout() {
    for flag in ["--help", "--version"] {
        let (code, out, err) = code_of(&["hilo", flag]);
        assert_eq!(code, SUCCESS, "{}", flag);
        assert!(!out.is_empty());
        assert!(err.is_empty());
    }
}

#[test]
fn missing_subcommand_is_an_error() {
    let (code, out, err) = code_of(&["hilo"]);
    assert_eq!(code, ERROR);
    assert!(out.is_empty());
    assert!(err.contains("Usage: hilo <command> [options]"));
}

#[test]
fn bad_flag_values_are_errors() {
    for args in [
        vec!["hilo", "sim", "--rounds", "zero"],
        vec!["hilo", "sim", "--mode", "turbo"],
        vec!["hilo", "deal", "--seed", "-1"],
    ] {
        let (code, _, err) = code_of(&args);
        assert_eq!(code, ERROR, "{:?}", args);
        assert!(err.contains("For full help, run: hilo --help"));
    }
}

#[test]
fn unknown_strategy_is_an_error() {
    let (code, out, err) = code_of(&["hilo", "deal", "--strategy", "martingale"]);
    assert_eq!(code, ERROR);
    assert!(out.is_empty());
    assert!(err.starts_with("Error: "));
}
