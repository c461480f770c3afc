//! Abstract syntax tree for the Weft UI language.
//!
//! The tree covers the typed-scripting subset the transformer needs:
//! expressions, statements, struct/component declarations with
//! decorators, and the lowered class form the transformer emits.
//! Nodes are immutable; rewriting builds new nodes bottom-up and spans
//! are carried along solely for diagnostics against the original source.

use weft_foundation::Span;

// =============================================================================
// Identifiers and types
// =============================================================================

/// An identifier with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    /// The identifier text.
    pub name: String,
    /// Source span.
    pub span: Span,
}

impl Ident {
    /// Creates an identifier.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A named type annotation like `: number` or `: Person`.
///
/// Classification into simple/object wrapping is the type oracle's job;
/// the syntax layer only records the written name.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeAnnotation {
    /// The written type name.
    pub name: String,
    /// Source span.
    pub span: Span,
}

impl TypeAnnotation {
    /// Creates a type annotation.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `null`
    Null(Span),
    /// `true` or `false`
    Bool(bool, Span),
    /// Numeric literal like `42` or `3.14`
    Number(f64, Span),
    /// String literal like `'hello'`
    Str(String, Span),
    /// Identifier reference
    Ident(Ident),
    /// `this`
    This(Span),
    /// Member access like `this.count` or `Button.create`
    Member(MemberExpr),
    /// Call like `Text('hi')`, possibly with a trailing child block
    Call(CallExpr),
    /// `new` expression like `new Child(...)`
    New(NewExpr),
    /// Object literal like `{ count: this.total }`
    Object(ObjectLit),
    /// Array literal like `[1, 2, 3]`
    Array(Vec<Expr>, Span),
    /// Arrow function like `(item) => { ... }`
    Arrow(ArrowFn),
    /// Assignment like `this.count = 0`
    Assign(AssignExpr),
    /// Unary operation like `!flag`
    Unary(UnaryExpr),
    /// Binary operation like `a + b`
    Binary(BinaryExpr),
    /// Two-way binding sugar `$$(expr)` at a call-argument position
    TwoWayBind(Box<Expr>, Span),
}

/// A member access expression.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpr {
    /// The object being accessed.
    pub object: Box<Expr>,
    /// The property name. A leading `$` marks pass-by-reference intent.
    pub property: Ident,
    /// Source span.
    pub span: Span,
}

/// A call expression.
///
/// Component invocations carry their child block as `body`, e.g.
/// `Column() { Text('a') }`.
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    /// The callee expression.
    pub callee: Box<Expr>,
    /// Call arguments.
    pub args: Vec<Expr>,
    /// Trailing child block for component invocations.
    pub body: Option<Vec<Stmt>>,
    /// Source span.
    pub span: Span,
}

/// A `new` expression.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpr {
    /// The constructed class name.
    pub callee: Ident,
    /// Constructor arguments.
    pub args: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

/// An object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectLit {
    /// The properties in written order.
    pub props: Vec<ObjectProp>,
    /// Source span.
    pub span: Span,
}

/// One `key: value` entry of an object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectProp {
    /// The property key.
    pub key: Ident,
    /// The property value.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

/// An arrow function.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowFn {
    /// Parameter names.
    pub params: Vec<Ident>,
    /// Body statements. An expression body is represented as a single
    /// expression statement.
    pub body: Vec<Stmt>,
    /// Source span.
    pub span: Span,
}

/// An assignment expression.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignExpr {
    /// Assignment target.
    pub target: Box<Expr>,
    /// Assigned value.
    pub value: Box<Expr>,
    /// Source span.
    pub span: Span,
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    /// Logical negation `!`
    Not,
    /// Arithmetic negation `-`
    Neg,
}

/// A unary operation.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    /// The operator.
    pub op: UnOp,
    /// The operand.
    pub operand: Box<Expr>,
    /// Source span.
    pub span: Span,
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinOp {
    /// The operator's source text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// A binary operation.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    /// The operator.
    pub op: BinOp,
    /// Left operand.
    pub lhs: Box<Expr>,
    /// Right operand.
    pub rhs: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Expr {
    /// Returns the source span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Null(s)
            | Self::Bool(_, s)
            | Self::Number(_, s)
            | Self::Str(_, s)
            | Self::This(s)
            | Self::Array(_, s)
            | Self::TwoWayBind(_, s) => *s,
            Self::Ident(i) => i.span,
            Self::Member(m) => m.span,
            Self::Call(c) => c.span,
            Self::New(n) => n.span,
            Self::Object(o) => o.span,
            Self::Arrow(a) => a.span,
            Self::Assign(a) => a.span,
            Self::Unary(u) => u.span,
            Self::Binary(b) => b.span,
        }
    }

    /// Returns the identifier name, or None if not an identifier.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(i) => Some(&i.name),
            _ => None,
        }
    }

    /// Returns the call expression, or None if not a call.
    #[must_use]
    pub fn as_call(&self) -> Option<&CallExpr> {
        match self {
            Self::Call(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the member expression, or None if not a member access.
    #[must_use]
    pub fn as_member(&self) -> Option<&MemberExpr> {
        match self {
            Self::Member(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the object literal, or None if not an object literal.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectLit> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the arrow function, or None if not one.
    #[must_use]
    pub fn as_arrow(&self) -> Option<&ArrowFn> {
        match self {
            Self::Arrow(a) => Some(a),
            _ => None,
        }
    }

    /// Returns true if this is `this.<field>` and yields the field name.
    ///
    /// A leading `$` on the field is preserved in the returned name.
    #[must_use]
    pub fn as_this_member(&self) -> Option<&str> {
        match self {
            Self::Member(m) => match m.object.as_ref() {
                Self::This(_) => Some(&m.property.name),
                _ => None,
            },
            _ => None,
        }
    }

    /// A human-readable kind name for this expression.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null(_) => "null",
            Self::Bool(_, _) => "bool",
            Self::Number(_, _) => "number",
            Self::Str(_, _) => "string",
            Self::Ident(_) => "identifier",
            Self::This(_) => "this",
            Self::Member(_) => "member access",
            Self::Call(_) => "call",
            Self::New(_) => "new expression",
            Self::Object(_) => "object literal",
            Self::Array(_, _) => "array literal",
            Self::Arrow(_) => "arrow function",
            Self::Assign(_) => "assignment",
            Self::Unary(_) => "unary operation",
            Self::Binary(_) => "binary operation",
            Self::TwoWayBind(_, _) => "two-way binding",
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// An expression statement.
    Expr(Expr),
    /// A variable declaration.
    VarDecl(VarDecl),
    /// An `if`/`else if`/`else` statement.
    If(IfStmt),
    /// A `return` statement.
    Return(Option<Expr>, Span),
    /// A braced block.
    Block(Vec<Stmt>, Span),
}

impl Stmt {
    /// Returns the source span of this statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(e) => e.span(),
            Self::VarDecl(v) => v.span,
            Self::If(i) => i.span,
            Self::Return(_, s) | Self::Block(_, s) => *s,
        }
    }

    /// Returns the inner expression, or None if not an expression statement.
    #[must_use]
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Self::Expr(e) => Some(e),
            _ => None,
        }
    }
}

/// Variable declaration kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    /// `let`
    Let,
    /// `const`
    Const,
    /// `var`
    Var,
}

impl VarKind {
    /// The keyword's source text.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Const => "const",
            Self::Var => "var",
        }
    }
}

/// A variable declaration statement.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    /// Declaration kind.
    pub kind: VarKind,
    /// Declared name.
    pub name: Ident,
    /// Initializer, if any.
    pub init: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// An `if` statement with optional chained arms.
#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    /// The condition.
    pub cond: Expr,
    /// The `then` block.
    pub then_branch: Vec<Stmt>,
    /// The `else` arm, if any.
    pub else_branch: Option<ElseArm>,
    /// Source span.
    pub span: Span,
}

/// The `else` arm of an `if` statement.
#[derive(Clone, Debug, PartialEq)]
pub enum ElseArm {
    /// `else if (...) { ... }`
    ElseIf(Box<IfStmt>),
    /// `else { ... }`
    Else(Vec<Stmt>, Span),
}

// =============================================================================
// Declarations
// =============================================================================

/// A decorator like `@State` or `@Watch('onChange')`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorator {
    /// Decorator name without the `@`.
    pub name: String,
    /// Decorator arguments, if written with parentheses.
    pub args: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

impl Decorator {
    /// Creates an argument-less decorator.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            span,
        }
    }

    /// Returns the first argument as a string literal, if present.
    #[must_use]
    pub fn string_arg(&self) -> Option<&str> {
        match self.args.first() {
            Some(Expr::Str(s, _)) => Some(s),
            _ => None,
        }
    }
}

/// A decorated field of a component struct.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    /// Field name.
    pub name: Ident,
    /// Decorators in written order.
    pub decorators: Vec<Decorator>,
    /// Declared type.
    pub ty: TypeAnnotation,
    /// Default value, if any.
    pub init: Option<Expr>,
    /// Whether the field is marked `private`.
    pub is_private: bool,
    /// Source span.
    pub span: Span,
}

impl FieldDecl {
    /// Returns true if the field carries a decorator with the given name.
    #[must_use]
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }

    /// Returns the decorator with the given name, if present.
    #[must_use]
    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }
}

/// A method of a component struct.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    /// Method name.
    pub name: Ident,
    /// Decorators in written order.
    pub decorators: Vec<Decorator>,
    /// Parameter names.
    pub params: Vec<Ident>,
    /// Body statements.
    pub body: Vec<Stmt>,
    /// Source span.
    pub span: Span,
}

/// A component struct declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct StructDecl {
    /// Struct name.
    pub name: Ident,
    /// Struct-level decorators (`@Component`, `@Entry`, `@CustomDialog`).
    pub decorators: Vec<Decorator>,
    /// Decorated fields.
    pub fields: Vec<FieldDecl>,
    /// Methods, including `build`.
    pub methods: Vec<MethodDecl>,
    /// Source span.
    pub span: Span,
}

impl StructDecl {
    /// Returns true if the struct carries a decorator with the given name.
    #[must_use]
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }

    /// Returns all methods named `name`.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDecl> {
        self.methods.iter().filter(move |m| m.name.name == name)
    }
}

/// A free function declaration (`@Builder`, `@Styles`, `@Extend`).
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    /// Function name.
    pub name: Ident,
    /// Decorators in written order.
    pub decorators: Vec<Decorator>,
    /// Parameter names.
    pub params: Vec<Ident>,
    /// Body statements.
    pub body: Vec<Stmt>,
    /// Source span.
    pub span: Span,
}

impl FunctionDecl {
    /// Returns true if the function carries a decorator with the given name.
    #[must_use]
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }

    /// Returns the decorator with the given name, if present.
    #[must_use]
    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }
}

/// An import declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    /// Imported names.
    pub names: Vec<Ident>,
    /// Module specifier string.
    pub specifier: String,
    /// Source span.
    pub span: Span,
}

// =============================================================================
// Lowered class form
// =============================================================================

/// A plain field of a lowered class.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassField {
    /// Field name (backing fields carry the `__` prefix).
    pub name: Ident,
    /// Initializer, if any.
    pub init: Option<Expr>,
    /// Whether the field is emitted as `private`.
    pub is_private: bool,
    /// Source span.
    pub span: Span,
}

/// The constructor of a lowered class.
#[derive(Clone, Debug, PartialEq)]
pub struct Constructor {
    /// Parameter names.
    pub params: Vec<Ident>,
    /// Body statements.
    pub body: Vec<Stmt>,
    /// Source span.
    pub span: Span,
}

/// One member of a lowered class.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    /// A plain field.
    Field(ClassField),
    /// The constructor.
    Constructor(Constructor),
    /// A method.
    Method(MethodDecl),
    /// A property getter.
    Getter {
        /// Property name.
        name: Ident,
        /// Body statements.
        body: Vec<Stmt>,
        /// Source span.
        span: Span,
    },
    /// A property setter.
    Setter {
        /// Property name.
        name: Ident,
        /// Parameter name.
        param: Ident,
        /// Body statements.
        body: Vec<Stmt>,
        /// Source span.
        span: Span,
    },
}

/// A lowered class declaration, emitted in place of a component struct.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    /// Class name.
    pub name: Ident,
    /// The runtime base class the lowered component extends.
    pub extends: Option<String>,
    /// Members in emission order.
    pub members: Vec<ClassMember>,
    /// Source span.
    pub span: Span,
}

impl ClassDecl {
    /// Returns the method with the given name, if present.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Method(method) if method.name.name == name => Some(method),
            _ => None,
        })
    }

    /// Returns the constructor, if present.
    #[must_use]
    pub fn constructor(&self) -> Option<&Constructor> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Constructor(c) => Some(c),
            _ => None,
        })
    }

    /// Returns the field with the given name, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ClassField> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Field(f) if f.name.name == name => Some(f),
            _ => None,
        })
    }

    /// Returns true if a getter exists for the given property name.
    #[must_use]
    pub fn has_getter(&self, name: &str) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m, ClassMember::Getter { name: n, .. } if n.name == name))
    }

    /// Returns true if a setter exists for the given property name.
    #[must_use]
    pub fn has_setter(&self, name: &str) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m, ClassMember::Setter { name: n, .. } if n.name == name))
    }
}

// =============================================================================
// Source files
// =============================================================================

/// A top-level item of a source file.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// An import declaration.
    Import(ImportDecl),
    /// A component struct declaration.
    Struct(StructDecl),
    /// A free function declaration.
    Function(FunctionDecl),
    /// A lowered class declaration (output form).
    Class(ClassDecl),
    /// A bare statement.
    Stmt(Stmt),
}

/// A parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFile {
    /// Path the file was parsed from.
    pub path: String,
    /// Top-level items in source order.
    pub items: Vec<Item>,
    /// Span of the whole file.
    pub span: Span,
}

impl SourceFile {
    /// Creates a source file.
    pub fn new(path: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            path: path.into(),
            items,
            span: Span::default(),
        }
    }

    /// Returns all struct declarations in source order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDecl> {
        self.items.iter().filter_map(|i| match i {
            Item::Struct(s) => Some(s),
            _ => None,
        })
    }

    /// Returns all function declarations in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.items.iter().filter_map(|i| match i {
            Item::Function(f) => Some(f),
            _ => None,
        })
    }

    /// Returns all import declarations in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|i| match i {
            Item::Import(i) => Some(i),
            _ => None,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
