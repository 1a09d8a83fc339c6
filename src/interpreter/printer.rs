use crate::{
    ast::{
        BinaryOperator, ComparisonOperator, Expr, FunctionDeclaration, Program, StatementList, Type,
    },
    visit::{Visitor, walk_program, walk_statement_list},
};

const INDENT: &str = "    ";

/// Writes a program back out as source text.
///
/// Nested operands are always parenthesized, so the output parses back into
/// the same tree regardless of precedence.
#[derive(Debug, Default)]
pub struct SourcePrinter {
    out:   String,
    depth: usize,
}

impl SourcePrinter {
    /// Creates a printer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything printed so far.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn indented(&mut self, list: &StatementList) {
        self.depth += 1;
        list.accept(self);
        self.depth -= 1;
    }

    fn operand(&mut self, expr: &Expr) -> String {
        let text = expr.accept(self);
        match expr {
            Expr::BinaryOp { .. } | Expr::Comparison { .. } => format!("({text})"),
            _ => text,
        }
    }
}

impl Visitor for SourcePrinter {
    type Value = String;
    type Flow = ();

    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_function(&mut self, function: &FunctionDeclaration) {
        let params = function.params
                             .iter()
                             .map(|param| format!("{}: {}", param.name, param.ty))
                             .collect::<Vec<_>>();

        self.line(&format!("func {}({}): {} {{",
                           function.name,
                           params.join(", "),
                           function.return_type));
        self.indented(&function.body);
        self.line("}");
    }

    fn visit_statement_list(&mut self, list: &StatementList) {
        walk_statement_list(self, list);
    }

    fn visit_declaration(&mut self, name: &str, ty: Type) {
        self.line(&format!("declare {name}: {ty};"));
    }

    fn visit_assignment(&mut self, name: &str, value: &Expr) {
        let value = value.accept(self);
        self.line(&format!("{name} = {value};"));
    }

    fn visit_print(&mut self, expr: &Expr) {
        let expr = expr.accept(self);
        self.line(&format!("print({expr});"));
    }

    fn visit_return(&mut self, expr: &Expr) {
        let expr = expr.accept(self);
        self.line(&format!("return {expr};"));
    }

    fn visit_if(&mut self,
                condition: &Expr,
                then_branch: &StatementList,
                else_branch: Option<&StatementList>) {
        let condition = condition.accept(self);
        self.line(&format!("if ({condition}) {{"));
        self.indented(then_branch);

        if let Some(else_branch) = else_branch {
            self.line("} else {");
            self.indented(else_branch);
        }
        self.line("}");
    }

    fn visit_number(&mut self, value: i64) -> String {
        value.to_string()
    }

    fn visit_variable(&mut self, name: &str) -> String {
        name.to_string()
    }

    fn visit_binary(&mut self, left: &Expr, op: BinaryOperator, right: &Expr) -> String {
        format!("{} {op} {}", self.operand(left), self.operand(right))
    }

    fn visit_comparison(&mut self, left: &Expr, op: ComparisonOperator, right: &Expr) -> String {
        format!("{} {op} {}", self.operand(left), self.operand(right))
    }

    fn visit_call(&mut self, name: &str, arguments: &[Expr]) -> String {
        let arguments = arguments.iter()
                                 .map(|argument| argument.accept(self))
                                 .collect::<Vec<_>>();
        format!("{name}({})", arguments.join(", "))
    }
}

/// Renders `program` as source text.
///
/// # Example
/// ```
/// use declang::{interpreter::printer::to_source, parse};
///
/// let program = parse("declare x:int;x=1+2*3;").unwrap();
/// assert_eq!(to_source(&program), "declare x: int;\nx = 1 + (2 * 3);\n");
/// ```
#[must_use]
pub fn to_source(program: &Program) -> String {
    let mut printer = SourcePrinter::new();
    program.accept(&mut printer);
    printer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn nested_blocks_are_indented() {
        let program = parse("func f(a: int, b: int): int { if (a < b) { return a; } else { return b; } }")
            .unwrap();
        let expected = "\
func f(a: int, b: int): int {
    if (a < b) {
        return a;
    } else {
        return b;
    }
}
";
        assert_eq!(to_source(&program), expected);
    }

    #[test]
    fn function_without_parameters_has_an_empty_list() {
        let program = parse("func main(): int { return 0; }").unwrap();
        assert_eq!(to_source(&program), "func main(): int {\n    return 0;\n}\n");
    }

    #[test]
    fn printed_source_parses_to_the_same_tree() {
        let source = "declare x: int;
                      func g(n: int): int { return n * (n - 1) / 2; }
                      x = g(3) - 4 - (5 - 6);
                      if (x == 1 < 2) { print(g(x)); }
                      print((1 + 2) * 3 + 4);";
        let program = parse(source).unwrap();
        let printed = to_source(&program);

        assert_eq!(parse(&printed).unwrap(), program);
    }

    #[test]
    fn calls_print_their_arguments() {
        let program = parse("print(f(1, g(), x + 1));").unwrap();
        assert_eq!(to_source(&program), "print(f(1, g(), x + 1));\n");
    }
}
