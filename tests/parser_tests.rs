use mjc::ast::{Exp, Stm, Type};
use mjc::parser::parse;
use mjc::{Config, Error};

fn parse_ok(source: &str) -> mjc::ast::Program {
    parse(source, &Config::default()).expect("failed to parse")
}

fn parse_err(source: &str) -> Error {
    parse(source, &Config::default()).expect_err("expected a syntax error")
}

const FAC: &str = r#"
class Factorial {
    public static void main(String[] a) {
        System.out.println(new Fac().ComputeFac(10));
    }
}
class Fac {
    public int ComputeFac(int num) {
        int num_aux;
        if (num < 1)
            num_aux = 1;
        else
            num_aux = num * this.ComputeFac(num - 1);
        return num_aux;
    }
}
"#;

#[test]
fn test_parse_factorial_shape() {
    let program = parse_ok(FAC);

    assert_eq!(program.main_class.name, "Factorial");
    assert_eq!(program.main_class.arg, "a");
    assert!(matches!(program.main_class.stm, Stm::Print { .. }));

    assert_eq!(program.classes.len(), 1);
    let fac = &program.classes[0];
    assert_eq!(fac.name, "Fac");
    assert!(fac.extends.is_none());

    let method = &fac.methods[0];
    assert_eq!(method.name, "ComputeFac");
    assert_eq!(method.ret_type, Type::Int);
    assert_eq!(method.formals.len(), 1);
    assert_eq!(method.locals.len(), 1);
    assert_eq!(method.locals[0].name, "num_aux");
    assert!(matches!(method.ret_exp, Exp::Id { .. }));

    // the else branch holds num * this.ComputeFac(num - 1)
    match &method.stms[0] {
        Stm::If { else_stm, .. } => match else_stm.as_ref() {
            Stm::Assign { exp, .. } => match exp {
                Exp::Times { right, .. } => {
                    assert!(matches!(right.as_ref(), Exp::Call { .. }));
                }
                other => panic!("expected Times, got {:?}", other),
            },
            other => panic!("expected Assign, got {:?}", other),
        },
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_parse_extends_and_fields() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(0);
    }
}
class B extends A {
    int x;
    boolean flag;
    int[] data;
    A other;
}
"#;
    let program = parse_ok(source);
    let b = &program.classes[0];
    assert_eq!(b.extends.as_deref(), Some("A"));
    assert_eq!(b.fields.len(), 4);
    assert_eq!(b.fields[2].typ, Type::IntArray);
    assert_eq!(b.fields[3].typ, Type::class("A"));
}

/// A local whose type is a class name is ambiguous with an assignment
/// until the token after the type is seen; the parser rewinds once and
/// re-reads the tokens as a statement.
#[test]
fn test_declaration_statement_disambiguation() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(0);
    }
}
class A {
    public int f() {
        int i;
        A obj;
        i = 0;
        obj = new A();
        return i;
    }
}
"#;
    let program = parse_ok(source);
    let method = &program.classes[0].methods[0];
    assert_eq!(method.locals.len(), 2);
    assert_eq!(method.locals[1].typ, Type::class("A"));
    assert_eq!(method.stms.len(), 2);
    assert!(matches!(&method.stms[0], Stm::Assign { name, .. } if name == "i"));
    assert!(matches!(&method.stms[1], Stm::Assign { name, .. } if name == "obj"));
}

#[test]
fn test_array_assignment_statement() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(0);
    }
}
class A {
    public int f() {
        int[] b;
        b = new int [10];
        b[0] = 3;
        return b[0];
    }
}
"#;
    let program = parse_ok(source);
    let method = &program.classes[0].methods[0];
    assert!(matches!(&method.stms[1], Stm::AssignArray { .. }));
    assert!(matches!(&method.ret_exp, Exp::ArraySelect { .. }));
}

/// Each binary level applies at most one operator, so a three-term chain
/// leaves its trailing operator unconsumed and fails one level up.
#[test]
fn test_chained_addition_is_a_syntax_error() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(1 + 2 + 3);
    }
}
"#;
    match parse_err(source) {
        Error::Syntax { expected, found, .. } => {
            assert!(expected.contains(")"), "expected ')', got {}", expected);
            assert!(found.contains("Plus"), "found {}", found);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_chain_parses() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println((1 + 2) + 3);
    }
}
"#;
    let program = parse_ok(source);
    match &program.main_class.stm {
        Stm::Print { exp, .. } => match exp {
            Exp::Add { left, .. } => assert!(matches!(left.as_ref(), Exp::Add { .. })),
            other => panic!("expected Add, got {:?}", other),
        },
        other => panic!("expected Print, got {:?}", other),
    }
}

/// Unary not chains through recursion even though binary operators do
/// not fold.
#[test]
fn test_double_negation_parses() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(0);
    }
}
class A {
    public boolean f(boolean b) {
        return !!b;
    }
}
"#;
    let program = parse_ok(source);
    let method = &program.classes[0].methods[0];
    match &method.ret_exp {
        Exp::Not { exp, .. } => assert!(matches!(exp.as_ref(), Exp::Not { .. })),
        other => panic!("expected Not, got {:?}", other),
    }
}

#[test]
fn test_precedence_times_binds_tighter_than_add() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(1 + 2 * 3);
    }
}
"#;
    let program = parse_ok(source);
    match &program.main_class.stm {
        Stm::Print { exp, .. } => match exp {
            Exp::Add { right, .. } => assert!(matches!(right.as_ref(), Exp::Times { .. })),
            other => panic!("expected Add at the top, got {:?}", other),
        },
        other => panic!("expected Print, got {:?}", other),
    }
}

#[test]
fn test_call_with_multiple_arguments() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(new A().f(1, true, new A()));
    }
}
"#;
    let program = parse_ok(source);
    match &program.main_class.stm {
        Stm::Print { exp, .. } => match exp {
            Exp::Call { name, args, .. } => {
                assert_eq!(name, "f");
                assert_eq!(args.len(), 3);
            }
            other => panic!("expected Call, got {:?}", other),
        },
        other => panic!("expected Print, got {:?}", other),
    }
}

#[test]
fn test_length_and_array_select() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(0);
    }
}
class A {
    public int f(int[] b) {
        return b.length;
    }
}
"#;
    let program = parse_ok(source);
    assert!(matches!(
        &program.classes[0].methods[0].ret_exp,
        Exp::Length { .. }
    ));
}

#[test]
fn test_if_requires_else() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        if (true)
            System.out.println(1);
    }
}
"#;
    match parse_err(source) {
        Error::Syntax { expected, .. } => assert!(expected.contains("else")),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_error_reports_expected_found_and_line() {
    let source = "class Main {\n  public static void main(String[] a) {\n    System.out.println(42)\n  }\n}\n";
    match parse_err(source) {
        Error::Syntax {
            line,
            expected,
            found,
        } => {
            assert_eq!(line, 4);
            assert!(expected.contains(";"));
            assert!(found.contains("RBrace"));
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_trailing_input_is_rejected() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(0);
    }
}
stray
"#;
    match parse_err(source) {
        Error::Syntax { expected, .. } => assert!(expected.contains("end of input")),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_integer_literal_out_of_range() {
    let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(99999999999999999999);
    }
}
"#;
    assert!(matches!(parse_err(source), Error::Syntax { .. }));
}

/// Same token stream, same tree: parsing is deterministic.
#[test]
fn test_parsing_is_deterministic() {
    let first = format!("{:?}", parse_ok(FAC));
    let second = format!("{:?}", parse_ok(FAC));
    assert_eq!(first, second);
}
