use std::fs;

use pseudokod::{
    error::{Error, RuntimeError},
    parse, run,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_pseudokod_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run(&code, Vec::new(), "".as_bytes()) {
                panic!("Example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No pseudokod examples found in book/src");
}

#[test]
fn example_script_runs() {
    let source = fs::read_to_string("tests/example.pseudo").expect("tests/example.pseudo");
    assert_eq!(output(&source),
               "[1, 1, 2, 3, 5, 8, 13, 21]\n{1, 2, 3, 5, 8, 13, 21}\n21 true\n");
}

fn extract_pseudokod_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```pseudokod") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn output_with_input(src: &str, input: &str) -> String {
    let mut out = Vec::new();
    if let Err(e) = run(src, &mut out, input.as_bytes()) {
        panic!("Script failed: {e}\n{src}");
    }
    String::from_utf8(out).unwrap()
}

fn output(src: &str) -> String {
    output_with_input(src, "")
}

fn assert_success(src: &str) {
    if let Err(e) = run(src, Vec::new(), "".as_bytes()) {
        panic!("Script failed: {e}");
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src, Vec::new(), "".as_bytes()) {
        Err(Error::Runtime(e)) => e,
        Err(e) => panic!("Expected a runtime error, got: {e}"),
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail"),
    }
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(output("print(3 + 4 * 2)"), "11\n");
    assert_eq!(output("print(7 div 2, 7 mod 2, 7 / 2)"), "3 1 3.5\n");
    assert_eq!(output("print((3 + 4) * 2, -2 * 3)"), "14 -6\n");
    assert_eq!(runtime_error("print(5 / 0)"), RuntimeError::DivisionByZero { line: 1 });
}

#[test]
fn logic_and_comparisons() {
    assert_eq!(output("print(2 < 3, 3 ≤ 2, 2 ≠ 3, 2 = 2)"), "true false true true\n");
    assert_eq!(output("print(NOT false, true AND false, true OR false)"), "true false true\n");
    assert_eq!(output("print(NIE prawda, prawda I fałsz, fałsz LUB prawda)"), "false false true\n");
    assert_eq!(output("print(6 & 3, 6 | 3, 6 xor 3, 1 << 3, 16 >> 2)"), "2 7 5 8 4\n");
    assert_eq!(output("print(\"abc\" < \"abd\", 'a' = 'a')"), "true true\n");
}

#[test]
fn comparing_different_types_fails() {
    assert!(matches!(runtime_error("print(1 = \"1\")"),
                     RuntimeError::IncompatibleDataTypes { .. }));
}

#[test]
fn membership() {
    assert_eq!(output("print(5 ∈ (0, 10], 0 ∈ (0, 10], 10 ∈ [0, 10])"), "true false true\n");
    assert_eq!(output("print(2 ∈ [1, 2, 3], 'x' ∈ {'a', 'b'})"), "true false\n");
}

#[test]
fn variables_must_be_declared_once() {
    assert!(matches!(runtime_error("x <- 1"), RuntimeError::VariableNotDeclared { .. }));
    assert!(matches!(runtime_error("number x\nnumber x"),
                     RuntimeError::VariableAlreadyDeclared { line: 2, .. }));
}

#[test]
fn blocks_may_shadow_outer_variables() {
    let src = "number x <- 1\nif true\n\tnumber x <- 2\n\tprint(x)\nprint(x)";
    assert_eq!(output(src), "2\n1\n");
}

#[test]
fn assignment_in_a_block_changes_the_outer_variable() {
    let src = "number x <- 1\nif true\n\tx <- 2\nprint(x)";
    assert_eq!(output(src), "2\n");
}

#[test]
fn constants_cannot_change() {
    assert_eq!(runtime_error("const number c <- 5\nc <- 6"),
               RuntimeError::ConstantAssignment { name: "c".to_string(),
                                                  line: 2, });
    assert_eq!(output("stała liczba c := 5\nprint(c)"), "5\n");
}

#[test]
fn declared_ranges() {
    assert_eq!(output("number x ∈ (0, 10] <- 10\nprint(x)"), "10\n");
    for value in [0, 11] {
        let src = format!("number x ∈ (0, 10] <- {value}");
        assert!(matches!(runtime_error(&src), RuntimeError::NumberOutOfRange { .. }));
    }
    assert!(matches!(runtime_error("number x ∈ [1, 3] <- 2\nx <- 4"),
                     RuntimeError::NumberOutOfRange { line: 2, .. }));
}

#[test]
fn for_loop_with_ellipsis() {
    let src = "for i = 1, 2, ..., 5\n\tprint(i)";
    assert_eq!(output(src), "1\n2\n3\n4\n5\n");

    let src = "dla i = 10, 7, ..., 1\n\twypisz(i)";
    assert_eq!(output(src), "10\n7\n4\n1\n");
}

#[test]
fn ellipsis_up_to_zero_runs_no_iterations() {
    let src = "function silnia(number n): number\n\tdata: number wynik <- 1\n\tfor i = 1, ..., n\n\t\twynik <- wynik * i\n\treturn wynik\nprint(silnia(0), silnia(4))";
    assert_eq!(output(src), "1 24\n");
}

#[test]
fn control_variable_does_not_outlive_the_loop() {
    assert!(matches!(runtime_error("for i = 1, 2\n\tprint(i)\nprint(i)"),
                     RuntimeError::VariableNotDeclared { line: 3, .. }));
}

#[test]
fn while_and_do_while() {
    let src = "number n <- 1\nwhile n < 100\n\tn <- n * 3\nprint(n)";
    assert_eq!(output(src), "243\n");

    let src = "number n <- 5\nwykonuj\n\tn <- n - 1\ndopóki n > 10\nprint(n)";
    assert_eq!(output(src), "4\n");
}

#[test]
fn recursion() {
    let src = "function fib(number n): number\n\tif n < 2\n\t\treturn n\n\treturn fib(n - 1) + fib(n - 2)\nprint(fib(15))";
    assert_eq!(output(src), "610\n");
}

#[test]
fn function_locals_are_private() {
    let src = "function f(number x): number\n\tdata: number t <- x * 2\n\treturn t\nprint(f(4))\nprint(t)";
    assert!(matches!(runtime_error(src), RuntimeError::VariableNotDeclared { line: 5, .. }));

    let src = "function f(number x)\n\tdata: number t\n\tprint(t)\n\tt <- x\nf(1)\nf(2)";
    assert_eq!(output(src), "null\nnull\n");
}

#[test]
fn lists_are_shared_between_variables() {
    let src = "list a <- [1, 2, 3]\nlist b <- a\nb[0] <- 9\nprint(a, size(a))";
    assert_eq!(output(src), "[9, 2, 3] 3\n");
}

#[test]
fn functions_modify_lists_in_place() {
    let src = "function zeruj(list t)\n\tfor i = 0, ..., size(t) - 1\n\t\tt[i] <- 0\nlist a <- [4, 5]\nzeruj(a)\nprint(a)";
    assert_eq!(output(src), "[0, 0]\n");

    let src = "function zeruj(list t)\n\tfor i = 0, ..., size(t) - 1\n\t\tt[i] <- 0\nlist a <- []\nzeruj(a)\nprint(a)";
    assert_eq!(output(src), "[]\n");
}

#[test]
fn stack_and_queue_natives() {
    let src = "stack s <- [1, 2]\npush(s, 3)\nprint(pop(s), top(s), size(s))\nwhile NOT empty(s)\n\tpop(s)\nprint(s)";
    assert_eq!(output(src), "3 2 2\nstack[]\n");

    let src = "kolejka q <- [1, 2]\nwstaw(q, 3)\nwypisz(zdejmij(q), przód(q), rozmiar(q))";
    assert_eq!(output(src), "1 2 2\n");

    assert!(matches!(runtime_error("stack s <- []\npop(s)"),
                     RuntimeError::EmptyContainer { line: 2, .. }));
}

#[test]
fn sets_deduplicate_and_sort() {
    assert_eq!(output("set z <- [3, 1, 3, 2]\nprint(z)"), "{1, 2, 3}\n");
}

#[test]
fn import_math_module() {
    assert_eq!(output("import math\nprint(sqrt(16), pow(2, 5), max([3, 7, 5]), floor(2.5))"),
               "4 32 7 2\n");
    assert!(matches!(runtime_error("print(sqrt(16))"), RuntimeError::VariableNotDeclared { .. }));
    assert!(matches!(runtime_error("import grafika"), RuntimeError::UnknownModule { .. }));
}

#[test]
fn get_reads_typed_input() {
    let src = "number a\nnumber b\nget(a)\nwczytaj(b)\nprint(a + b)";
    assert_eq!(output_with_input(src, "2\n40\n"), "42\n");

    let src = "string imie\nget(imie)\nprint(\"Witaj\", imie)";
    assert_eq!(output_with_input(src, "Ala\n"), "Witaj Ala\n");
}

#[test]
fn output_before_an_error_is_kept() {
    let mut out = Vec::new();
    let result = run("print(1)\nprint(x)", &mut out, "".as_bytes());

    assert!(matches!(result, Err(Error::Runtime(RuntimeError::VariableNotDeclared { .. }))));
    assert_eq!(out, b"1\n");
}

#[test]
fn parse_errors_are_reported() {
    assert!(matches!(parse("while true\n\tprint(1)"), Err(Error::Parse(_))));
    assert!(matches!(parse("print(1"), Err(Error::Parse(_))));
    assert!(matches!(parse("x <- $"), Err(Error::Lex(_))));
}

#[test]
fn rendered_programs_behave_the_same() {
    let sources = ["number x <- 3 + 4 * 2\nprint(x)",
                   "data: number a <- 1, const string s <- \"z\"\nif a ≥ 1\n\tprint(s)\nelse if a = 0\n\tprint(a)\nelse\n\tprint(0)",
                   "function f(number n): number\n\tdata: number k <- 2\n\treturn n * k\nfor i = 1, ..., 3\n\tprint(f(i))",
                   "number n <- 0\ndo\n\tn <- n + 1\nwhile n < 3\nprint(n ∈ (0, 3], 7 div 2)",
                   "list t <- [1, 2]\nt[1] <- 5\nprint(t, {1, 2}, 'c')",
                   "number x\nprint((x <- 2) + 1)\nprint(x)",
                   "number x\nprint(-(x <- 2))\nnumber y <- x <- 4\nprint(x, y)",
                   "number a\nnumber b\na <- b <- 3\nprint(a + b)"];

    for src in sources {
        let rendered = parse(src).unwrap().to_string();
        assert_eq!(output(src), output(&rendered), "rendered as:\n{rendered}");
        assert_eq!(parse(&rendered).unwrap().to_string(), rendered);
    }
}

#[test]
fn program_value_is_returned() {
    let value = run("number x <- 20\nx + 22", Vec::new(), "".as_bytes()).unwrap();
    assert_eq!(value.to_string(), "42");
    assert_success("// comment only\n");
}
