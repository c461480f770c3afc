//! AST data model for the Weft UI language.
//!
//! This crate provides:
//! - `ast` - Expression, statement, and declaration node types shared by
//!   the front end (which produces them) and the lowering pass (which
//!   consumes and re-emits them)
//! - `make` - Node-construction helpers for synthesized output
//! - `pretty` - Rendering lowered ASTs back to source text
//!
//! The parser and type binder live in the host compiler; Weft receives a
//! syntactically valid, type-checked tree and never re-parses text.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod make;
pub mod pretty;

pub use ast::{
    ArrowFn, AssignExpr, BinOp, BinaryExpr, CallExpr, ClassDecl, ClassField, ClassMember,
    Constructor, Decorator, ElseArm, Expr, FieldDecl, FunctionDecl, Ident, IfStmt, ImportDecl,
    Item, MemberExpr, MethodDecl, NewExpr, ObjectLit, ObjectProp, SourceFile, Stmt, StructDecl,
    TypeAnnotation, UnOp, UnaryExpr, VarDecl, VarKind,
};
