use sea_orm::{
    ColumnTrait,
    sea_query::{Expr, Func, SimpleExpr},
};

/// Case-insensitive "starts with" filter for text columns.
pub trait StartsWithIgnoreCase {
    fn starts_with_ignore_case(&self, prefix: &str) -> SimpleExpr;
}

impl<C> StartsWithIgnoreCase for C
where
    C: ColumnTrait,
{
    fn starts_with_ignore_case(&self, prefix: &str) -> SimpleExpr {
        Expr::expr(Func::lower(Expr::col(*self)))
            .like(format!("{}%", escape_like(&prefix.to_lowercase())))
    }
}

/// Escape LIKE wildcards so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
