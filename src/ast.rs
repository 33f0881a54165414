use std::fmt::{self, Display};

/// A node of the syntax tree.
///
/// Composite nodes own their children exclusively.
#[derive(strum::IntoStaticStr, Debug, Clone, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Node {
    Number(f64),
    String(String),
    Bool(bool),
    Var(String),

    Lambda {
        params: Vec<String>,
        body: Box<Node>,
    },

    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },

    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },

    /// A binary operation; assignment is represented with [`BinOp::Assign`].
    Binary {
        op: BinOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },

    Prog(Vec<Node>),

    /// Not produced by the parser.
    Let {
        names: Vec<String>,
        body: Box<Node>,
    },
}

impl Node {
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn lambda(params: Vec<String>, body: Node) -> Self {
        Self::Lambda {
            params,
            body: Box::new(body),
        }
    }

    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn if_(cond: Node, then_branch: Node, else_branch: Option<Node>) -> Self {
        Self::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn binary(op: BinOp, lhs: Node, rhs: Node) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Collapses a block body: no statements become `false`, a single statement stands for
    /// itself.
    pub fn block(statements: Vec<Node>) -> Self {
        match <[Node; 1]>::try_from(statements) {
            Ok([statement]) => statement,
            Err(statements) if statements.is_empty() => Self::Bool(false),
            Err(statements) => Self::Prog(statements),
        }
    }

    /// Prints the node as a whole program.
    ///
    /// The statements of a `Prog` are separated by `;` instead of forming a block, so a parsed
    /// program prints back to source that parses to the same tree.
    pub fn display_program(&self) -> impl Display + '_ {
        ProgramDisplay(self)
    }

    fn needs_parens(&self) -> bool {
        matches!(self, Self::Lambda { .. } | Self::If { .. } | Self::Let { .. })
    }
}

fn fmt_operand(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    if node.needs_parens() {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

fn fmt_names(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    write!(f, "({})", names.join(", "))
}

fn fmt_seq(f: &mut fmt::Formatter<'_>, nodes: &[Node], sep: &str) -> fmt::Result {
    for (idx, node) in nodes.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }

        write!(f, "{node}")?;
    }

    Ok(())
}

struct ProgramDisplay<'a>(&'a Node);

impl Display for ProgramDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Node::Prog(statements) => fmt_seq(f, statements, ";\n"),
            node => write!(f, "{node}"),
        }
    }
}

/// Prints the node back as expression source.
///
/// A `Prog` prints as a block, which reads back the same when it has at least two statements.
/// `Let` has no surface syntax and prints as `let (names) body` for inspection only.
impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),

            Self::String(value) => {
                f.write_str("\"")?;

                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }

                    write!(f, "{c}")?;
                }

                f.write_str("\"")
            }

            Self::Bool(value) => write!(f, "{value}"),
            Self::Var(name) => f.write_str(name),

            Self::Lambda { params, body } => {
                f.write_str("lambda ")?;
                fmt_names(f, params)?;
                write!(f, " {body}")
            }

            Self::Call { callee, args } => {
                match **callee {
                    Node::Var(ref name) => f.write_str(name)?,
                    ref callee => write!(f, "({callee})")?,
                }

                f.write_str("(")?;
                fmt_seq(f, args, ", ")?;
                f.write_str(")")
            }

            Self::If {
                cond,
                then_branch,
                else_branch,
            } => {
                f.write_str("if ")?;
                fmt_operand(f, cond)?;
                f.write_str(" then ")?;
                fmt_operand(f, then_branch)?;

                if let Some(else_branch) = else_branch {
                    f.write_str(" else ")?;
                    fmt_operand(f, else_branch)?;
                }

                Ok(())
            }

            Self::Binary { op, lhs, rhs } => {
                f.write_str("(")?;
                fmt_operand(f, lhs)?;
                write!(f, " {op} ")?;
                fmt_operand(f, rhs)?;
                f.write_str(")")
            }

            Self::Prog(statements) => {
                f.write_str("{ ")?;
                fmt_seq(f, statements, "; ")?;
                f.write_str(" }")
            }

            Self::Let { names, body } => {
                f.write_str("let ")?;
                fmt_names(f, names)?;
                write!(f, " {body}")
            }
        }
    }
}

#[derive(
    strum::Display, strum::EnumString, strum::VariantArray, Debug, Clone, Copy, PartialEq, Eq, Hash,
)]
pub enum BinOp {
    #[strum(serialize = "=")]
    Assign,

    #[strum(serialize = "||")]
    Or,

    #[strum(serialize = "&&")]
    And,

    #[strum(serialize = "<")]
    Lt,

    #[strum(serialize = ">")]
    Gt,

    #[strum(serialize = "<=")]
    Le,

    #[strum(serialize = ">=")]
    Ge,

    #[strum(serialize = "==")]
    Eq,

    #[strum(serialize = "!=")]
    Ne,

    #[strum(serialize = "+")]
    Add,

    #[strum(serialize = "-")]
    Sub,

    #[strum(serialize = "*")]
    Mul,

    #[strum(serialize = "/")]
    Div,

    #[strum(serialize = "%")]
    Rem,
}

impl BinOp {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Assign => 1,
            Self::Or => 2,
            Self::And => 3,
            Self::Lt | Self::Gt | Self::Le | Self::Ge | Self::Eq | Self::Ne => 7,
            Self::Add | Self::Sub => 10,
            Self::Mul | Self::Div | Self::Rem => 20,
        }
    }
}
