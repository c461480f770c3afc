//! Pretty-printer for AST nodes.
//!
//! Renders lowered ASTs back to source text so downstream tooling (and
//! tests) can inspect the emitted program. Output is deterministic for
//! a given tree and configuration.

use std::fmt::Write;

use crate::ast::{
    ClassDecl, ClassMember, ElseArm, Expr, FunctionDecl, IfStmt, Item, MethodDecl, SourceFile,
    Stmt, StructDecl,
};

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Pretty-print a whole source file.
#[must_use]
pub fn pretty_print_file(file: &SourceFile) -> String {
    let mut printer = PrettyPrinter::new(PrettyConfig::default());
    for item in &file.items {
        printer.print_item(item);
    }
    printer.output
}

/// Pretty-print a single statement.
#[must_use]
pub fn pretty_print_stmt(stmt: &Stmt) -> String {
    let mut printer = PrettyPrinter::new(PrettyConfig::default());
    printer.print_stmt(stmt);
    printer.output
}

/// Pretty-print a slice of statements, one per line.
#[must_use]
pub fn pretty_print_stmts(stmts: &[Stmt]) -> String {
    let mut printer = PrettyPrinter::new(PrettyConfig::default());
    for stmt in stmts {
        printer.print_stmt(stmt);
    }
    printer.output
}

/// Pretty-print a single expression.
#[must_use]
pub fn pretty_print_expr(expr: &Expr) -> String {
    let mut printer = PrettyPrinter::new(PrettyConfig::default());
    printer.print_expr(expr);
    printer.output
}

/// Pretty-printer state.
struct PrettyPrinter {
    config: PrettyConfig,
    output: String,
    indent_level: usize,
}

impl PrettyPrinter {
    fn new(config: PrettyConfig) -> Self {
        Self {
            config,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.indent_level * self.config.indent_width {
            self.output.push(' ');
        }
    }

    fn print_item(&mut self, item: &Item) {
        match item {
            Item::Import(import) => {
                self.indent();
                let names: Vec<&str> = import.names.iter().map(|n| n.name.as_str()).collect();
                let _ = writeln!(
                    self.output,
                    "import {{ {} }} from '{}';",
                    names.join(", "),
                    import.specifier
                );
            }
            Item::Struct(decl) => self.print_struct(decl),
            Item::Function(decl) => self.print_function(decl),
            Item::Class(decl) => self.print_class(decl),
            Item::Stmt(stmt) => self.print_stmt(stmt),
        }
    }

    fn print_struct(&mut self, decl: &StructDecl) {
        for dec in &decl.decorators {
            self.indent();
            let _ = writeln!(self.output, "@{}", dec.name);
        }
        self.indent();
        let _ = writeln!(self.output, "struct {} {{", decl.name.name);
        self.indent_level += 1;
        for field in &decl.fields {
            self.indent();
            for dec in &field.decorators {
                let _ = write!(self.output, "@{} ", dec.name);
            }
            let _ = write!(self.output, "{}: {}", field.name.name, field.ty.name);
            if let Some(init) = &field.init {
                let _ = write!(self.output, " = ");
                self.print_expr(init);
            }
            let _ = writeln!(self.output, ";");
        }
        for method in &decl.methods {
            self.print_method(method);
        }
        self.indent_level -= 1;
        self.indent();
        let _ = writeln!(self.output, "}}");
    }

    fn print_function(&mut self, decl: &FunctionDecl) {
        for dec in &decl.decorators {
            self.indent();
            let _ = writeln!(self.output, "@{}", dec.name);
        }
        self.indent();
        let params: Vec<&str> = decl.params.iter().map(|p| p.name.as_str()).collect();
        let _ = writeln!(
            self.output,
            "function {}({}) {{",
            decl.name.name,
            params.join(", ")
        );
        self.print_block(&decl.body);
        self.indent();
        let _ = writeln!(self.output, "}}");
    }

    fn print_class(&mut self, decl: &ClassDecl) {
        self.indent();
        let _ = write!(self.output, "class {}", decl.name.name);
        if let Some(base) = &decl.extends {
            let _ = write!(self.output, " extends {base}");
        }
        let _ = writeln!(self.output, " {{");
        self.indent_level += 1;
        for member in &decl.members {
            self.print_class_member(member);
        }
        self.indent_level -= 1;
        self.indent();
        let _ = writeln!(self.output, "}}");
    }

    fn print_class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(field) => {
                self.indent();
                if field.is_private {
                    let _ = write!(self.output, "private ");
                }
                let _ = write!(self.output, "{}", field.name.name);
                if let Some(init) = &field.init {
                    let _ = write!(self.output, " = ");
                    self.print_expr(init);
                }
                let _ = writeln!(self.output, ";");
            }
            ClassMember::Constructor(ctor) => {
                self.indent();
                let params: Vec<&str> = ctor.params.iter().map(|p| p.name.as_str()).collect();
                let _ = writeln!(self.output, "constructor({}) {{", params.join(", "));
                self.print_block(&ctor.body);
                self.indent();
                let _ = writeln!(self.output, "}}");
            }
            ClassMember::Method(method) => self.print_method(method),
            ClassMember::Getter { name, body, .. } => {
                self.indent();
                let _ = writeln!(self.output, "get {}() {{", name.name);
                self.print_block(body);
                self.indent();
                let _ = writeln!(self.output, "}}");
            }
            ClassMember::Setter {
                name, param, body, ..
            } => {
                self.indent();
                let _ = writeln!(self.output, "set {}({}) {{", name.name, param.name);
                self.print_block(body);
                self.indent();
                let _ = writeln!(self.output, "}}");
            }
        }
    }

    fn print_method(&mut self, method: &MethodDecl) {
        for dec in &method.decorators {
            self.indent();
            let _ = writeln!(self.output, "@{}", dec.name);
        }
        self.indent();
        let params: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
        let _ = writeln!(
            self.output,
            "{}({}) {{",
            method.name.name,
            params.join(", ")
        );
        self.print_block(&method.body);
        self.indent();
        let _ = writeln!(self.output, "}}");
    }

    fn print_block(&mut self, stmts: &[Stmt]) {
        self.indent_level += 1;
        for stmt in stmts {
            self.print_stmt(stmt);
        }
        self.indent_level -= 1;
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => {
                self.indent();
                self.print_expr(expr);
                let _ = writeln!(self.output, ";");
            }
            Stmt::VarDecl(decl) => {
                self.indent();
                let _ = write!(self.output, "{} {}", decl.kind.keyword(), decl.name.name);
                if let Some(init) = &decl.init {
                    let _ = write!(self.output, " = ");
                    self.print_expr(init);
                }
                let _ = writeln!(self.output, ";");
            }
            Stmt::If(stmt) => self.print_if(stmt),
            Stmt::Return(value, _) => {
                self.indent();
                let _ = write!(self.output, "return");
                if let Some(value) = value {
                    let _ = write!(self.output, " ");
                    self.print_expr(value);
                }
                let _ = writeln!(self.output, ";");
            }
            Stmt::Block(stmts, _) => {
                self.indent();
                let _ = writeln!(self.output, "{{");
                self.print_block(stmts);
                self.indent();
                let _ = writeln!(self.output, "}}");
            }
        }
    }

    fn print_if(&mut self, stmt: &IfStmt) {
        self.indent();
        let _ = write!(self.output, "if (");
        self.print_expr(&stmt.cond);
        let _ = writeln!(self.output, ") {{");
        self.print_block(&stmt.then_branch);
        self.indent();
        let _ = write!(self.output, "}}");
        match &stmt.else_branch {
            Some(ElseArm::ElseIf(inner)) => {
                let _ = write!(self.output, " else ");
                // Reprint inline without the leading indent.
                let mut inner_printer = PrettyPrinter::new(self.config.clone());
                inner_printer.indent_level = self.indent_level;
                inner_printer.print_if(inner);
                let _ = write!(self.output, "{}", inner_printer.output.trim_start());
            }
            Some(ElseArm::Else(stmts, _)) => {
                let _ = writeln!(self.output, " else {{");
                self.print_block(stmts);
                self.indent();
                let _ = writeln!(self.output, "}}");
            }
            None => {
                let _ = writeln!(self.output);
            }
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Null(_) => self.output.push_str("null"),
            Expr::Bool(b, _) => {
                let _ = write!(self.output, "{b}");
            }
            Expr::Number(n, _) => {
                if n.fract() == 0.0 && n.is_finite() {
                    let _ = write!(self.output, "{}", *n as i64);
                } else {
                    let _ = write!(self.output, "{n}");
                }
            }
            Expr::Str(s, _) => {
                let _ = write!(self.output, "'{s}'");
            }
            Expr::Ident(i) => self.output.push_str(&i.name),
            Expr::This(_) => self.output.push_str("this"),
            Expr::Member(m) => {
                self.print_expr(&m.object);
                let _ = write!(self.output, ".{}", m.property.name);
            }
            Expr::Call(c) => {
                self.print_expr(&c.callee);
                self.output.push('(');
                self.print_args(&c.args);
                self.output.push(')');
                if let Some(body) = &c.body {
                    let _ = writeln!(self.output, " {{");
                    self.print_block(body);
                    self.indent();
                    let _ = write!(self.output, "}}");
                }
            }
            Expr::New(n) => {
                let _ = write!(self.output, "new {}(", n.callee.name);
                self.print_args(&n.args);
                self.output.push(')');
            }
            Expr::Object(o) => {
                if o.props.is_empty() {
                    self.output.push_str("{}");
                } else {
                    self.output.push_str("{ ");
                    for (i, prop) in o.props.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        let _ = write!(self.output, "{}: ", prop.key.name);
                        self.print_expr(&prop.value);
                    }
                    self.output.push_str(" }");
                }
            }
            Expr::Array(elements, _) => {
                self.output.push('[');
                self.print_args(elements);
                self.output.push(']');
            }
            Expr::Arrow(a) => {
                let params: Vec<&str> = a.params.iter().map(|p| p.name.as_str()).collect();
                let _ = write!(self.output, "({}) => {{", params.join(", "));
                if a.body.is_empty() {
                    self.output.push('}');
                } else {
                    let _ = writeln!(self.output);
                    self.print_block(&a.body);
                    self.indent();
                    self.output.push('}');
                }
            }
            Expr::Assign(a) => {
                self.print_expr(&a.target);
                self.output.push_str(" = ");
                self.print_expr(&a.value);
            }
            Expr::Unary(u) => {
                let symbol = match u.op {
                    crate::ast::UnOp::Not => "!",
                    crate::ast::UnOp::Neg => "-",
                };
                self.output.push_str(symbol);
                self.print_expr(&u.operand);
            }
            Expr::Binary(b) => {
                self.print_expr(&b.lhs);
                let _ = write!(self.output, " {} ", b.op.symbol());
                self.print_expr(&b.rhs);
            }
            Expr::TwoWayBind(inner, _) => {
                self.output.push_str("$$(");
                self.print_expr(inner);
                self.output.push(')');
            }
        }
    }

    fn print_args(&mut self, args: &[Expr]) {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.print_expr(arg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
