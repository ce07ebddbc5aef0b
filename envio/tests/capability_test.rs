// Integration tests for environment programs

use envio::{console, log, CannotFail, Console, ConsoleError, Io, LiveEnv, Logger, TestEnv};
use proptest::prelude::*;

fn quiz<Env: Console + Logger>() -> Io<Env, (), ConsoleError> {
    log::info("Starting the quiz...")
        .then(console::write_line("Enter your name:"))
        .bind_fallible(|_| console::read_line())
        .bind_infallible(|name| console::write_line(format!("Hello, {name}!")))
        .bind_infallible(|_| log::info("Quiz finished"))
}

#[test]
fn quiz_runs_against_test_environment() -> anyhow::Result<()> {
    let mut env = TestEnv::new().with_response("Ada");
    quiz().run(&mut env)?;
    assert_eq!(env.written(), ["Enter your name:", "Hello, Ada!"]);
    assert_eq!(env.logs(), ["Starting the quiz...", "Quiz finished"]);
    Ok(())
}

#[test]
fn substituting_the_console_changes_only_the_substituted_output() {
    let mut hello = TestEnv::new().with_response("Hello");
    let mut world = TestEnv::new().with_response("World");
    quiz().run(&mut hello).unwrap();
    quiz().run(&mut world).unwrap();

    let differing: Vec<_> = hello
        .written()
        .iter()
        .zip(world.written())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(
        differing,
        [(&"Hello, Hello!".to_string(), &"Hello, World!".to_string())]
    );
    assert_eq!(hello.logs(), world.logs());
}

#[test]
fn failing_read_skips_the_rest() {
    let mut env = TestEnv::new().failing_with("unplugged");
    let result = quiz().run(&mut env);
    assert!(matches!(result, Err(ConsoleError::Scripted(ref m)) if m == "unplugged"));
    // Only the steps before the read happened.
    assert_eq!(env.written(), ["Enter your name:"]);
    assert_eq!(env.logs(), ["Starting the quiz..."]);
}

#[test]
fn exhausted_input_is_a_closed_console() {
    let mut env = TestEnv::new();
    assert!(matches!(quiz().run(&mut env), Err(ConsoleError::Closed)));
}

#[test]
fn quiz_runs_against_live_environment() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("envio=info")
        .with_test_writer()
        .try_init();

    let input = std::io::Cursor::new(b"Grace\n".to_vec());
    let mut env = LiveEnv::with_console(input, Vec::new());
    quiz().run(&mut env).unwrap();
    let (_, output) = env.into_console();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Enter your name:\nHello, Grace!\n"
    );
}

#[test]
fn infallible_programs_compose_into_infallible_programs() {
    let program: Io<TestEnv, usize> = log::info("a")
        .then(log::info("b"))
        .map(|_| 2);
    let mut env = TestEnv::new();
    assert_eq!(program.run_infallible(&mut env), 2);
}

#[test]
fn fallible_programs_with_the_same_error_compose() {
    let program: Io<TestEnv, String, ConsoleError> = console::read_line()
        .bind(|first| console::read_line().map(move |second| format!("{first} {second}")));
    let mut env = TestEnv::new().with_response("x").with_response("y");
    assert_eq!(program.run(&mut env).unwrap(), "x y");
}

#[test]
fn widened_programs_keep_their_value() {
    let widened: Io<TestEnv, u8, String> = Io::<TestEnv, u8, CannotFail>::succeed(7).widen();
    assert_eq!(widened.run(&mut TestEnv::new()), Ok(7));
}

proptest! {
    #[test]
    fn left_identity(x in any::<i32>()) {
        let f = |v: i32| Io::<TestEnv, i64, String>::succeed(i64::from(v) * 2);
        let lhs = Io::succeed(x).bind(f).run(&mut TestEnv::new());
        let rhs = f(x).run(&mut TestEnv::new());
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn right_identity(x in any::<i32>(), fail in any::<bool>()) {
        let build = || if fail {
            Io::<TestEnv, i32, String>::fail(format!("e{x}"))
        } else {
            Io::succeed(x)
        };
        let lhs = build().bind(Io::succeed).run(&mut TestEnv::new());
        let rhs = build().run(&mut TestEnv::new());
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn associativity(messages in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
        fn step(message: String) -> Io<TestEnv, usize> {
            log::info(message.clone()).map(move |_| message.len())
        }
        let first = messages[0].clone();
        let rest = messages[1..].join("");

        let mut left = TestEnv::new();
        let rest_l = rest.clone();
        let lhs = step(first.clone())
            .bind(move |n| step(format!("{n}{rest_l}")))
            .bind(|m| step(m.to_string()))
            .run_infallible(&mut left);

        let mut right = TestEnv::new();
        let rhs = step(first)
            .bind(move |n| step(format!("{n}{rest}")).bind(|m| step(m.to_string())))
            .run_infallible(&mut right);

        prop_assert_eq!(lhs, rhs);
        prop_assert_eq!(left.logs(), right.logs());
    }
}
