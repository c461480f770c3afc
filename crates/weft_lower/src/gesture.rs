//! Gesture attribute lowering.
//!
//! A gesture combinator attribute (`gesture`, `parallelGesture`,
//! `priorityGesture`) carries a gesture-type expression tree: a
//! constructor call (`TapGesture(...)`, `GestureGroup(...)`) with event
//! binds chained onto it. Each node lowers to its own create/bind/pop
//! triple, and the whole tree is bracketed by a `Gesture.create` call
//! tagged with the priority the combinator implies.

use weft_foundation::DiagnosticCode;
use weft_syntax::ast::{CallExpr, Expr, Stmt};
use weft_syntax::make;

use crate::context::CompilationContext;

/// Priority tag carried by the bracketing `Gesture.create` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePriority {
    /// `gesture(...)`
    Low,
    /// `priorityGesture(...)`
    High,
    /// `parallelGesture(...)`
    Parallel,
}

impl GesturePriority {
    /// Maps a combinator attribute name to its priority, if it is one.
    #[must_use]
    pub fn from_attr(name: &str) -> Option<Self> {
        match name {
            "gesture" => Some(Self::Low),
            "priorityGesture" => Some(Self::High),
            "parallelGesture" => Some(Self::Parallel),
            _ => None,
        }
    }

    /// The runtime enum member expression for this priority.
    #[must_use]
    pub fn runtime_expr(self) -> Expr {
        let member = match self {
            Self::Low => "Low",
            Self::High => "High",
            Self::Parallel => "Parallel",
        };
        make::member(make::ident("GesturePriority"), member)
    }
}

/// Gesture constructor names recognized in the tree.
const GESTURE_TYPES: &[&str] = &[
    "TapGesture",
    "LongPressGesture",
    "PanGesture",
    "PinchGesture",
    "RotationGesture",
    "SwipeGesture",
    "GestureGroup",
];

/// Returns true if the name is a gesture constructor.
#[must_use]
pub fn is_gesture_type(name: &str) -> bool {
    GESTURE_TYPES.contains(&name)
}

/// Lowers one gesture combinator attribute into statements.
///
/// Emits `Gesture.create(priority)`, the recursively lowered gesture
/// tree, then `Gesture.pop()`. A malformed tree is reported and emits
/// nothing further.
pub fn lower_gesture_attr(
    ctx: &mut CompilationContext<'_>,
    priority: GesturePriority,
    arg: &Expr,
    out: &mut Vec<Stmt>,
) {
    out.push(make::expr_stmt(make::method_call(
        "Gesture",
        "create",
        vec![priority.runtime_expr()],
    )));
    lower_gesture_node(ctx, arg, out);
    out.push(make::expr_stmt(make::method_call("Gesture", "pop", vec![])));
}

/// Lowers one gesture-tree node (constructor plus chained event binds).
fn lower_gesture_node(ctx: &mut CompilationContext<'_>, expr: &Expr, out: &mut Vec<Stmt>) {
    // Collect event binds outermost-first, then find the constructor at
    // the chain root.
    let mut binds: Vec<(&str, &CallExpr)> = Vec::new();
    let mut cursor = expr;
    loop {
        match cursor {
            Expr::Call(call) => match call.callee.as_ref() {
                Expr::Member(member) => {
                    binds.push((&member.property.name, call));
                    cursor = &member.object;
                }
                Expr::Ident(ident) if is_gesture_type(&ident.name) => {
                    let type_name = ident.name.clone();
                    emit_gesture_create(ctx, &type_name, call, out);
                    // Event binds apply innermost-first, matching their
                    // left-to-right source order.
                    for (event, bind_call) in binds.into_iter().rev() {
                        out.push(make::expr_stmt(make::method_call(
                            type_name.clone(),
                            event,
                            bind_call.args.clone(),
                        )));
                    }
                    out.push(make::expr_stmt(make::method_call(
                        type_name, "pop", vec![],
                    )));
                    return;
                }
                _ => break,
            },
            _ => break,
        }
    }

    ctx.sink.error(
        DiagnosticCode::InvalidComponentStatement,
        "gesture attribute expects a gesture constructor expression",
        expr.span(),
    );
}

fn emit_gesture_create(
    ctx: &mut CompilationContext<'_>,
    type_name: &str,
    call: &CallExpr,
    out: &mut Vec<Stmt>,
) {
    if type_name == "GestureGroup" {
        // First argument is the group mode; the rest are sub-gestures.
        let mode = call.args.first().cloned();
        out.push(make::expr_stmt(make::method_call(
            "GestureGroup",
            "create",
            mode.into_iter().collect(),
        )));
        for sub in call.args.iter().skip(1) {
            lower_gesture_node(ctx, sub, out);
        }
    } else {
        out.push(make::expr_stmt(make::method_call(
            type_name,
            "create",
            call.args.clone(),
        )));
    }
}

// =============================================================================
// Tests
// =============================================================================
