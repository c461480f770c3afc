//! Node-construction helpers for synthesized AST.
//!
//! Lowering builds new immutable nodes bottom-up; every helper here
//! produces a node with a default span, since synthesized code has no
//! position in the original source. Diagnostics always use the spans of
//! the nodes the user actually wrote.

use weft_foundation::Span;

use crate::ast::{
    ArrowFn, AssignExpr, BinOp, BinaryExpr, CallExpr, Expr, Ident, MemberExpr, NewExpr, ObjectLit,
    ObjectProp, Stmt, UnOp, UnaryExpr, VarDecl, VarKind,
};

/// Creates an identifier expression.
#[must_use]
pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Ident(Ident::new(name, Span::default()))
}

/// Creates an identifier node (not wrapped in an expression).
#[must_use]
pub fn id(name: impl Into<String>) -> Ident {
    Ident::new(name, Span::default())
}

/// Creates a `this` expression.
#[must_use]
pub fn this() -> Expr {
    Expr::This(Span::default())
}

/// Creates a `null` literal.
#[must_use]
pub fn null() -> Expr {
    Expr::Null(Span::default())
}

/// Creates a boolean literal.
#[must_use]
pub fn bool_lit(value: bool) -> Expr {
    Expr::Bool(value, Span::default())
}

/// Creates a numeric literal.
#[must_use]
pub fn num(value: f64) -> Expr {
    Expr::Number(value, Span::default())
}

/// Creates a string literal.
#[must_use]
pub fn str_lit(value: impl Into<String>) -> Expr {
    Expr::Str(value.into(), Span::default())
}

/// Creates a member access `object.property`.
#[must_use]
pub fn member(object: Expr, property: impl Into<String>) -> Expr {
    Expr::Member(MemberExpr {
        object: Box::new(object),
        property: Ident::new(property, Span::default()),
        span: Span::default(),
    })
}

/// Creates `this.property`.
#[must_use]
pub fn this_member(property: impl Into<String>) -> Expr {
    member(this(), property)
}

/// Creates a call expression with no trailing block.
#[must_use]
pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        callee: Box::new(callee),
        args,
        body: None,
        span: Span::default(),
    })
}

/// Creates a call with a trailing child block.
#[must_use]
pub fn call_with_body(callee: Expr, args: Vec<Expr>, body: Vec<Stmt>) -> Expr {
    Expr::Call(CallExpr {
        callee: Box::new(callee),
        args,
        body: Some(body),
        span: Span::default(),
    })
}

/// Creates `Receiver.method(args)`.
#[must_use]
pub fn method_call(receiver: impl Into<String>, method: impl Into<String>, args: Vec<Expr>) -> Expr {
    call(member(ident(receiver), method), args)
}

/// Creates `this.method(args)`.
#[must_use]
pub fn this_call(method: impl Into<String>, args: Vec<Expr>) -> Expr {
    call(member(this(), method), args)
}

/// Creates a `new` expression.
#[must_use]
pub fn new_expr(callee: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::New(NewExpr {
        callee: Ident::new(callee, Span::default()),
        args,
        span: Span::default(),
    })
}

/// Creates an object literal from `(key, value)` pairs.
#[must_use]
pub fn object(props: Vec<(&str, Expr)>) -> Expr {
    Expr::Object(ObjectLit {
        props: props
            .into_iter()
            .map(|(key, value)| ObjectProp {
                key: Ident::new(key, Span::default()),
                value,
                span: Span::default(),
            })
            .collect(),
        span: Span::default(),
    })
}

/// Creates an array literal.
#[must_use]
pub fn array(elements: Vec<Expr>) -> Expr {
    Expr::Array(elements, Span::default())
}

/// Creates an arrow function.
#[must_use]
pub fn arrow(params: Vec<&str>, body: Vec<Stmt>) -> Expr {
    Expr::Arrow(ArrowFn {
        params: params
            .into_iter()
            .map(|p| Ident::new(p, Span::default()))
            .collect(),
        body,
        span: Span::default(),
    })
}

/// Creates an assignment expression.
#[must_use]
pub fn assign(target: Expr, value: Expr) -> Expr {
    Expr::Assign(AssignExpr {
        target: Box::new(target),
        value: Box::new(value),
        span: Span::default(),
    })
}

/// Creates a unary operation.
#[must_use]
pub fn unary(op: UnOp, operand: Expr) -> Expr {
    Expr::Unary(UnaryExpr {
        op,
        operand: Box::new(operand),
        span: Span::default(),
    })
}

/// Creates a binary operation.
#[must_use]
pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary(BinaryExpr {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        span: Span::default(),
    })
}

/// Creates an expression statement.
#[must_use]
pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(expr)
}

/// Creates an assignment statement.
#[must_use]
pub fn assign_stmt(target: Expr, value: Expr) -> Stmt {
    Stmt::Expr(assign(target, value))
}

/// Creates a `let` declaration.
#[must_use]
pub fn let_decl(name: impl Into<String>, init: Expr) -> Stmt {
    Stmt::VarDecl(VarDecl {
        kind: VarKind::Let,
        name: Ident::new(name, Span::default()),
        init: Some(init),
        span: Span::default(),
    })
}

/// Creates a `const` declaration.
#[must_use]
pub fn const_decl(name: impl Into<String>, init: Expr) -> Stmt {
    Stmt::VarDecl(VarDecl {
        kind: VarKind::Const,
        name: Ident::new(name, Span::default()),
        init: Some(init),
        span: Span::default(),
    })
}

/// Creates a `var` declaration.
#[must_use]
pub fn var_decl(name: impl Into<String>, init: Expr) -> Stmt {
    Stmt::VarDecl(VarDecl {
        kind: VarKind::Var,
        name: Ident::new(name, Span::default()),
        init: Some(init),
        span: Span::default(),
    })
}

/// Creates a `return` statement.
#[must_use]
pub fn return_stmt(value: Option<Expr>) -> Stmt {
    Stmt::Return(value, Span::default())
}
