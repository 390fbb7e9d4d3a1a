use spirograph::program::main;
use spirograph::program::run;
use std::fs::create_dir_all;
use std::fs::read;
use std::fs::read_to_string;
use std::fs::remove_file;
use std::fs::write;
use std::io::sink;
use std::path::Path;

const TIMESTAMP: &str = "2021-01-01T00:00:00Z";

#[macro_export]
macro_rules! test_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let prefix = &name[..name.len() - 3];
        let offset = prefix.rfind("::").unwrap();
        &prefix[offset + 2..]
    }};
}

#[macro_export]
macro_rules! test_case {
    ($name:ident, $suffix:literal, $flags:expr) => {
        #[test]
        fn $name() {
            for directory in vec!["tests/expected", "tests/actual"].iter() {
                create_dir_all(directory).unwrap_or_else(|_| {
                    // BEGIN NOT TESTED
                    panic!("failed to create {} results directory", directory)
                    // END NOT TESTED
                });
            }

            let file_name = format!("{}.{}", test_name!(), $suffix);
            let mut flags: Vec<String> = $flags.iter().map(|string| string.to_string()).collect();
            flags.push("--timestamp".to_string());
            flags.push(TIMESTAMP.to_string());
            flags.push("--output".to_string());
            flags.push(format!("tests/actual/{}", file_name));
            main(&flags).unwrap();
            impl_assert_output(&file_name);
        }
    };
}

fn impl_assert_output(file_name: &str) {
    let actual_path = format!("tests/actual/{}", file_name);
    let actual_bytes = read(actual_path.clone()).unwrap();

    let expected_path = format!("tests/expected/{}", file_name);
    let expected_bytes = read(expected_path.clone()).unwrap_or_else(|_| {
        // BEGIN NOT TESTED
        write(expected_path.clone(), &actual_bytes).unwrap_or_else(|_| {
            panic!("failed to write expected results file {}", expected_path);
        });
        eprintln!(
            "WARNING: created expected results file {}, verify its contents",
            expected_path
        );
        actual_bytes.clone().to_vec()
        // END NOT TESTED
    });

    assert!(
        expected_bytes == actual_bytes,
        "The actual results file {} is different from the expected results file {}",
        expected_path,
        actual_path
    );
}

test_case! {
    defaults,
    "svg",
    vec!["test", "-n", "1"]
}

test_case! {
    coarse_epitrochoid,
    "svg",
    vec!["test", "-n", "2", "-T", "epitrochoid", "-t", "0.1", "-c", "5"]
}

test_case! {
    small_canvas,
    "svg",
    vec!["test", "-s", "200", "-w", "0.5", "-C", "#ABC", "-t", "0.2", "-c", "3"]
}

fn to_flags(flags: &[&str]) -> Vec<String> {
    flags.iter().map(|string| string.to_string()).collect()
}

fn run_to_stdout(flags: &[&str]) -> (String, String) {
    let mut flags = to_flags(flags);
    flags.extend(to_flags(&["--timestamp", TIMESTAMP, "-o", "-"]));
    let mut input = "".as_bytes();
    let mut svg: Vec<u8> = vec![];
    let mut messages: Vec<u8> = vec![];
    run(&flags, &mut input, &mut svg, &mut messages).unwrap();
    (
        String::from_utf8(svg).unwrap(),
        String::from_utf8(messages).unwrap(),
    )
}

fn attribute<'a>(svg: &'a str, name: &str) -> &'a str {
    let prefix = format!(" {}=\"", name);
    let start = svg.find(&prefix).unwrap() + prefix.len();
    let length = svg[start..].find('"').unwrap();
    &svg[start..start + length]
}

#[test]
fn stdout_output() {
    let (svg, messages) = run_to_stdout(&["test", "-n", "1"]);
    let expected = read_to_string("tests/expected/defaults.svg").unwrap();
    assert!(svg == expected, "standard output differs from tests/expected/defaults.svg");
    assert!(messages.contains("<stdout>"));
}

#[test]
fn default_output_file() {
    let output_path = Path::new("spirograph-19991231-235958.svg");
    let flags = to_flags(&["test", "-n", "1", "--timestamp", "1999-12-31T23:59:58Z"]);
    let mut input = "".as_bytes();
    let mut messages: Vec<u8> = vec![];
    run(&flags, &mut input, &mut sink(), &mut messages).unwrap();

    let svg = read_to_string(output_path).unwrap();
    remove_file(output_path).unwrap();
    assert!(svg.contains("<desc>Generated on 1999-12-31T23:59:58</desc>"));
    assert!(String::from_utf8(messages)
        .unwrap()
        .contains("spirograph-19991231-235958.svg"));
}

#[test]
fn random_design() {
    let (svg, _) = run_to_stdout(&["test", "--random", "-n", "7"]);
    assert!(svg.contains("<title>Spirograph Design 7</title>"));
    assert_eq!(run_to_stdout(&["test", "--random", "-n", "7"]).0, svg);
    assert_ne!(run_to_stdout(&["test", "--random", "-n", "8"]).0, svg);

    let size = attribute(&svg, "width").parse::<u32>().unwrap();
    assert!((200..=3000).contains(&size));
    let width = attribute(&svg, "stroke-width").parse::<f64>().unwrap();
    assert!((0.1..=10.0).contains(&width));
    let color = attribute(&svg, "stroke");
    assert_eq!(color.len(), 7);
    assert!(color.starts_with('#'));
}

#[test]
fn random_design_with_overrides() {
    let (random_svg, _) = run_to_stdout(&["test", "--random", "-n", "7"]);
    let (svg, messages) = run_to_stdout(&[
        "test",
        "--random",
        "-n",
        "7",
        "-T",
        "epitrochoid",
        "-s",
        "400",
    ]);
    assert_eq!(attribute(&svg, "width"), "400");
    assert!(messages.contains(" epitrochoid\n"));
    assert_eq!(attribute(&svg, "stroke"), attribute(&random_svg, "stroke"));
    assert_eq!(
        attribute(&svg, "stroke-width"),
        attribute(&random_svg, "stroke-width")
    );
}

#[test]
fn interactive_answers() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("interactive.svg");
    let flags = to_flags(&[
        "test",
        "-i",
        "--cycles",
        "2",
        "--timestamp",
        TIMESTAMP,
        "-o",
        output_path.to_str().unwrap(),
    ]);

    // Design number, then every knob except cycles, in order.
    let answers = "3\n100\n\n\n0.1\n\n300\nnot-a-color\n#00FF00\nepitrochoid\n";
    let mut input = answers.as_bytes();
    let mut messages: Vec<u8> = vec![];
    run(&flags, &mut input, &mut sink(), &mut messages).unwrap();

    let svg = read_to_string(&output_path).unwrap();
    assert!(svg.contains("<title>Spirograph Design 3</title>"));
    assert!(svg.contains("<desc>Generated on 2021-01-01T00:00:00</desc>"));
    assert!(svg.contains("width=\"300\" height=\"300\""));
    assert!(svg.contains("stroke=\"#00ff00\""));

    let messages = String::from_utf8(messages).unwrap();
    assert!(messages.contains("Design number (seed) [1]: "));
    assert!(messages.contains("Outer radius of the fixed circle [180.0]: "));
    assert!(!messages.contains("Number of rotations to complete"));
    assert!(messages.contains("stroke_color must be a hex value like #ff00aa: not-a-color"));
    assert!(messages.contains("Spirograph Design Summary"));
}

#[test]
fn interactive_input_ends_early() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("unfinished.svg");
    let flags = to_flags(&["test", "-i", "-o", output_path.to_str().unwrap()]);

    let mut input = "1\n200\n".as_bytes();
    let mut messages: Vec<u8> = vec![];
    assert!(run(&flags, &mut input, &mut sink(), &mut messages).is_err());
    assert!(!output_path.exists());
}

#[test]
fn invalid_knob_is_rejected() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("invalid.svg");
    let flags = to_flags(&[
        "test",
        "--outer-radius",
        "5",
        "-o",
        output_path.to_str().unwrap(),
    ]);

    let mut input = "".as_bytes();
    let mut messages: Vec<u8> = vec![];
    let error = run(&flags, &mut input, &mut sink(), &mut messages).unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid configuration: outer_radius must be >= 10"
    );
    assert!(!output_path.exists());
}

#[test]
fn invalid_timestamp_is_rejected() {
    let flags = to_flags(&["test", "--timestamp", "yesterday", "-o", "-"]);
    let mut input = "".as_bytes();
    let mut messages: Vec<u8> = vec![];
    assert!(run(&flags, &mut input, &mut sink(), &mut messages).is_err());
}
