/// Operator precedence of a rendered expression. Lower binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order(pub u8);

impl Order {
    pub const ATOMIC: Order = Order(0);
    pub const UNARY: Order = Order(1);
    pub const MULTIPLICATIVE: Order = Order(2);
    pub const ADDITIVE: Order = Order(3);
    pub const RELATIONAL: Order = Order(5);
    pub const EQUALITY: Order = Order(6);
    pub const LOGICAL_AND: Order = Order(10);
    pub const LOGICAL_OR: Order = Order(11);
    pub const NONE: Order = Order(99);

    /// Whether an expression of order `inner` must be parenthesised when
    /// embedded where `self` is required.
    ///
    /// Equal orders are wrapped too, except for atomic-in-atomic and
    /// none-in-none.
    pub fn needs_parens(self, inner: Order) -> bool {
        if self > inner {
            return false;
        }
        !(self == inner && (self == Order::ATOMIC || self == Order::NONE))
    }

    pub fn wrap(self, code: String, inner: Order) -> String {
        if self.needs_parens(inner) {
            format!("({})", code)
        } else {
            code
        }
    }
}
