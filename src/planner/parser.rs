//! Recursive-descent parser for the query dialect
//!
//! Operator precedence, lowest first:
//! 1. `?:`
//! 2. `??`
//! 3. `OR`
//! 4. `AND`
//! 5. `NOT`
//! 6. `= != <> < <= > >=`, `IN`, `BETWEEN`
//! 7. `|`, then `^`, then `&`
//! 8. `<< >> >>>`
//! 9. `+ - ||`
//! 10. `* / %`
//! 11. unary `- + ~`
//! 12. property access

use crate::errors::{Position, QueryError, QueryResult};
use crate::ordering::Direction;
use crate::value::{ArithmeticOp, CompareOp, UnaryOp, Value};

use super::ast::{
    BinaryOperator, Expr, FromClause, OrderItem, SelectItem, SelectQuery, Selection,
    UnaryOperator,
};
use super::lexer::{is_keyword, tokenize, Token, TokenKind};

/// Deepest parser recursion accepted; each level is a parenthesis, bracket,
/// brace, `NOT` or unary sign
const MAX_NESTING: usize = 64;

/// Tallest expression tree accepted, so evaluation stays bounded
const MAX_DEPTH: usize = 128;

/// Parses trimmed query text into a [`SelectQuery`]
pub fn parse(text: &str) -> QueryResult<SelectQuery> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        text,
        tokens,
        pos: 0,
        depth: 0,
    };
    let query = parser.select()?;
    if !matches!(parser.peek().kind, TokenKind::Eof) {
        return Err(parser.unexpected("end of query"));
    }
    Ok(query)
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        // tokenize always ends with Eof, and advance never moves past it
        &self.tokens[self.pos]
    }

    fn peek_at(&self, ahead: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + ahead).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn error_at(&self, offset: usize, reason: impl Into<String>) -> QueryError {
        QueryError::syntax(Position::locate(self.text, offset), reason)
    }

    fn too_deep(&self, offset: usize) -> QueryError {
        self.error_at(offset, "Expression nested too deeply")
    }

    /// Runs `parse` one nesting level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> QueryResult<T>) -> QueryResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.too_deep(self.peek().offset));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self, expected: &str) -> QueryError {
        let token = self.peek();
        let found = match &token.kind {
            TokenKind::Number(n) => format!("number {}", n),
            TokenKind::String(s) => format!("string '{}'", s),
            TokenKind::Ident(s) => format!("'{}'", s),
            TokenKind::Parameter(p) => format!("parameter {}", p),
            TokenKind::Symbol(s) => format!("'{}'", s),
            TokenKind::Eof => "end of input".to_string(),
        };
        self.error_at(token.offset, format!("Expected {} but {} found", expected, found))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_symbol(&mut self, symbol: &str) -> bool {
        if self.peek().is_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> QueryResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword))
        }
    }

    fn expect_symbol(&mut self, symbol: &str) -> QueryResult<()> {
        if self.eat_symbol(symbol) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", symbol)))
        }
    }

    /// A non-keyword identifier
    fn identifier(&mut self) -> QueryResult<String> {
        match &self.peek().kind {
            TokenKind::Ident(name) if !is_keyword(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Any identifier, keywords included; used after `.` and `AS`
    fn name(&mut self) -> QueryResult<String> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("name")),
        }
    }

    // ===== Statement =====

    fn select(&mut self) -> QueryResult<SelectQuery> {
        self.expect_keyword("SELECT")?;

        let top = if self.eat_keyword("TOP") {
            let offset = self.peek().offset;
            match self.advance().kind {
                TokenKind::Number(n) if n >= 0.0 && n.fract() == 0.0 => Some(n as u64),
                _ => return Err(self.error_at(offset, "TOP expects a non-negative integer")),
            }
        } else {
            None
        };

        let selection = if self.eat_symbol("*") {
            Selection::All
        } else if self.eat_keyword("VALUE") {
            Selection::Value(self.expression()?)
        } else {
            let mut items = vec![self.select_item()?];
            while self.eat_symbol(",") {
                items.push(self.select_item()?);
            }
            Selection::Items(items)
        };

        self.expect_keyword("FROM")?;
        let collection = self.identifier()?;
        let alias = if self.eat_keyword("AS") {
            Some(self.identifier()?)
        } else if matches!(&self.peek().kind, TokenKind::Ident(name) if !is_keyword(name)) {
            Some(self.identifier()?)
        } else {
            None
        };

        let filter = if self.eat_keyword("WHERE") {
            Some(self.expression()?)
        } else {
            None
        };

        let mut order_by = Vec::new();
        if self.eat_keyword("ORDER") {
            self.expect_keyword("BY")?;
            order_by.push(self.order_item()?);
            while self.eat_symbol(",") {
                order_by.push(self.order_item()?);
            }
        }

        Ok(SelectQuery {
            top,
            selection,
            from: FromClause { collection, alias },
            filter,
            order_by,
        })
    }

    fn select_item(&mut self) -> QueryResult<SelectItem> {
        let expr = self.expression()?;
        let alias = if self.eat_keyword("AS") {
            Some(self.name()?)
        } else {
            None
        };
        Ok(SelectItem { expr, alias })
    }

    fn order_item(&mut self) -> QueryResult<OrderItem> {
        let offset = self.peek().offset;
        let expr = self.expression()?;
        match expr.as_path() {
            Some((_, path)) if !path.is_empty() => {}
            _ => return Err(self.error_at(offset, "ORDER BY expects a property path")),
        }
        let direction = if self.eat_keyword("DESC") {
            Direction::Descending
        } else {
            self.eat_keyword("ASC");
            Direction::Ascending
        };
        Ok(OrderItem { expr, direction })
    }

    // ===== Expressions =====

    fn expression(&mut self) -> QueryResult<Expr> {
        let offset = self.peek().offset;
        let outermost = self.depth == 0;
        let expr = self.nested(Self::conditional)?;
        if outermost && expr.depth() > MAX_DEPTH {
            return Err(self.too_deep(offset));
        }
        Ok(expr)
    }

    fn conditional(&mut self) -> QueryResult<Expr> {
        let test = self.coalesce()?;
        if !self.eat_symbol("?") {
            return Ok(test);
        }
        let consequent = self.expression()?;
        self.expect_symbol(":")?;
        let alternate = self.expression()?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    fn coalesce(&mut self) -> QueryResult<Expr> {
        let mut left = self.or()?;
        while self.eat_symbol("??") {
            let right = self.or()?;
            left = Expr::binary(BinaryOperator::Coalesce, left, right);
        }
        Ok(left)
    }

    fn or(&mut self) -> QueryResult<Expr> {
        let mut left = self.and()?;
        while self.eat_keyword("OR") {
            let right = self.and()?;
            left = Expr::binary(BinaryOperator::Or, left, right);
        }
        Ok(left)
    }

    fn and(&mut self) -> QueryResult<Expr> {
        let mut left = self.not()?;
        while self.eat_keyword("AND") {
            let right = self.not()?;
            left = Expr::binary(BinaryOperator::And, left, right);
        }
        Ok(left)
    }

    fn not(&mut self) -> QueryResult<Expr> {
        if self.eat_keyword("NOT") {
            let operand = self.nested(Self::not)?;
            return Ok(Expr::unary(UnaryOperator::Not, operand));
        }
        self.relational()
    }

    fn relational(&mut self) -> QueryResult<Expr> {
        let mut left = self.bit_or()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Symbol("=") => Some(BinaryOperator::Eq),
                TokenKind::Symbol("!=") | TokenKind::Symbol("<>") => Some(BinaryOperator::Ne),
                TokenKind::Symbol("<") => Some(BinaryOperator::Compare(CompareOp::Lt)),
                TokenKind::Symbol("<=") => Some(BinaryOperator::Compare(CompareOp::Le)),
                TokenKind::Symbol(">") => Some(BinaryOperator::Compare(CompareOp::Gt)),
                TokenKind::Symbol(">=") => Some(BinaryOperator::Compare(CompareOp::Ge)),
                _ => None,
            };
            if let Some(op) = op {
                self.advance();
                let right = self.bit_or()?;
                left = Expr::binary(op, left, right);
                continue;
            }

            let negated = self.peek().is_keyword("NOT")
                && (self.peek_at(1).is_keyword("IN") || self.peek_at(1).is_keyword("BETWEEN"));
            if negated {
                self.advance();
            }

            let expr = if self.eat_keyword("IN") {
                self.expect_symbol("(")?;
                let list = self.expression_list(")")?;
                Expr::In {
                    needle: Box::new(left),
                    list,
                }
            } else if self.eat_keyword("BETWEEN") {
                let low = self.bit_or()?;
                self.expect_keyword("AND")?;
                let high = self.bit_or()?;
                Expr::Between {
                    value: Box::new(left),
                    low: Box::new(low),
                    high: Box::new(high),
                }
            } else {
                return Ok(left);
            };
            left = if negated {
                Expr::unary(UnaryOperator::Not, expr)
            } else {
                expr
            };
        }
    }

    fn bit_or(&mut self) -> QueryResult<Expr> {
        let mut left = self.bit_xor()?;
        while self.eat_symbol("|") {
            let right = self.bit_xor()?;
            left = Expr::binary(BinaryOperator::Arithmetic(ArithmeticOp::BitOr), left, right);
        }
        Ok(left)
    }

    fn bit_xor(&mut self) -> QueryResult<Expr> {
        let mut left = self.bit_and()?;
        while self.eat_symbol("^") {
            let right = self.bit_and()?;
            left = Expr::binary(BinaryOperator::Arithmetic(ArithmeticOp::BitXor), left, right);
        }
        Ok(left)
    }

    fn bit_and(&mut self) -> QueryResult<Expr> {
        let mut left = self.shift()?;
        while self.eat_symbol("&") {
            let right = self.shift()?;
            left = Expr::binary(BinaryOperator::Arithmetic(ArithmeticOp::BitAnd), left, right);
        }
        Ok(left)
    }

    fn shift(&mut self) -> QueryResult<Expr> {
        let mut left = self.additive()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Symbol("<<") => ArithmeticOp::Shl,
                TokenKind::Symbol(">>") => ArithmeticOp::Shr,
                TokenKind::Symbol(">>>") => ArithmeticOp::UShr,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.additive()?;
            left = Expr::binary(BinaryOperator::Arithmetic(op), left, right);
        }
    }

    fn additive(&mut self) -> QueryResult<Expr> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Symbol("+") => BinaryOperator::Arithmetic(ArithmeticOp::Add),
                TokenKind::Symbol("-") => BinaryOperator::Arithmetic(ArithmeticOp::Sub),
                TokenKind::Symbol("||") => BinaryOperator::Concat,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.multiplicative()?;
            left = Expr::binary(op, left, right);
        }
    }

    fn multiplicative(&mut self) -> QueryResult<Expr> {
        let mut left = self.unary()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Symbol("*") => ArithmeticOp::Mul,
                TokenKind::Symbol("/") => ArithmeticOp::Div,
                TokenKind::Symbol("%") => ArithmeticOp::Rem,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = Expr::binary(BinaryOperator::Arithmetic(op), left, right);
        }
    }

    fn unary(&mut self) -> QueryResult<Expr> {
        let op = match &self.peek().kind {
            TokenKind::Symbol("-") => UnaryOp::Minus,
            TokenKind::Symbol("+") => UnaryOp::Plus,
            TokenKind::Symbol("~") => UnaryOp::BitNot,
            _ => return self.postfix(),
        };
        self.advance();
        let operand = self.nested(Self::unary)?;
        Ok(Expr::unary(UnaryOperator::Arithmetic(op), operand))
    }

    fn postfix(&mut self) -> QueryResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.eat_symbol(".") {
                let key = self.name()?;
                expr = Expr::property(expr, key);
            } else if self.eat_symbol("[") {
                let key = self.expression()?;
                self.expect_symbol("]")?;
                expr = Expr::Property {
                    object: Box::new(expr),
                    key: Box::new(key),
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn primary(&mut self) -> QueryResult<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Literal(Value::Number(n)))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::Literal(Value::String(s)))
            }
            TokenKind::Parameter(name) => {
                self.advance();
                Ok(Expr::Parameter(name))
            }
            TokenKind::Symbol("(") => {
                self.advance();
                let expr = self.expression()?;
                self.expect_symbol(")")?;
                Ok(expr)
            }
            TokenKind::Symbol("[") => {
                self.advance();
                Ok(Expr::Array(self.expression_list("]")?))
            }
            TokenKind::Symbol("{") => {
                self.advance();
                self.object_literal()
            }
            TokenKind::Ident(word) => self.word(word),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn word(&mut self, word: String) -> QueryResult<Expr> {
        let literal = match word.to_ascii_uppercase().as_str() {
            "TRUE" => Some(Value::Bool(true)),
            "FALSE" => Some(Value::Bool(false)),
            "NULL" => Some(Value::Null),
            "UNDEFINED" => Some(Value::Absent),
            _ => None,
        };
        if let Some(value) = literal {
            self.advance();
            return Ok(Expr::Literal(value));
        }
        if is_keyword(&word) {
            return Err(self.unexpected("expression"));
        }

        self.advance();
        if word.eq_ignore_ascii_case("udf")
            && self.peek().is_symbol(".")
            && self.peek_at(2).is_symbol("(")
        {
            self.advance();
            let name = self.name()?;
            self.expect_symbol("(")?;
            let args = self.expression_list(")")?;
            return Ok(Expr::Call {
                name,
                args,
                udf: true,
            });
        }
        if self.eat_symbol("(") {
            let args = self.expression_list(")")?;
            return Ok(Expr::Call {
                name: word.to_ascii_uppercase(),
                args,
                udf: false,
            });
        }
        Ok(Expr::Identifier(word))
    }

    /// Comma-separated expressions up to and including `close`
    fn expression_list(&mut self, close: &str) -> QueryResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.eat_symbol(close) {
            return Ok(items);
        }
        loop {
            items.push(self.expression()?);
            if self.eat_symbol(close) {
                return Ok(items);
            }
            self.expect_symbol(",")?;
        }
    }

    fn object_literal(&mut self) -> QueryResult<Expr> {
        let mut entries = Vec::new();
        if self.eat_symbol("}") {
            return Ok(Expr::Object(entries));
        }
        loop {
            let key = match self.peek().kind.clone() {
                TokenKind::String(s) => {
                    self.advance();
                    s
                }
                _ => self.name()?,
            };
            self.expect_symbol(":")?;
            entries.push((key, self.expression()?));
            if self.eat_symbol("}") {
                return Ok(Expr::Object(entries));
            }
            self.expect_symbol(",")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QueryErrorCode;

    fn c() -> Expr {
        Expr::Identifier("c".into())
    }

    fn filter(text: &str) -> Expr {
        parse(text).unwrap().filter.unwrap()
    }

    #[test]
    fn test_parse_select_all() {
        let query = parse("SELECT * FROM c").unwrap();
        assert_eq!(query.selection, Selection::All);
        assert_eq!(query.from.binding(), "c");
        assert!(query.filter.is_none());
        assert!(query.order_by.is_empty());
        assert_eq!(query.top, None);
    }

    #[test]
    fn test_parse_keywords_case_insensitive() {
        let query = parse("select top 3 value r.id from root r order by r.id desc").unwrap();
        assert_eq!(query.top, Some(3));
        assert_eq!(query.selection, Selection::Value(Expr::property(Expr::Identifier("r".into()), "id")));
        assert_eq!(query.from.collection, "root");
        assert_eq!(query.from.alias.as_deref(), Some("r"));
        assert_eq!(query.order_by[0].direction, Direction::Descending);
    }

    #[test]
    fn test_parse_select_items() {
        let query = parse("SELECT c.id, c.name AS n FROM c").unwrap();
        match query.selection {
            Selection::Items(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].alias, None);
                assert_eq!(items[1].alias.as_deref(), Some("n"));
            }
            other => panic!("unexpected selection {:?}", other),
        }
    }

    #[test]
    fn test_precedence_and_binds_tighter_than_or() {
        let expr = filter("SELECT * FROM c WHERE c.a = 1 OR c.b = 2 AND c.c = 3");
        match expr {
            Expr::Binary {
                op: BinaryOperator::Or,
                right,
                ..
            } => assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinaryOperator::And,
                    ..
                }
            )),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_precedence_arithmetic() {
        let expr = filter("SELECT * FROM c WHERE 1 + 2 * 3 = 7");
        let expected = Expr::binary(
            BinaryOperator::Eq,
            Expr::binary(
                BinaryOperator::Arithmetic(ArithmeticOp::Add),
                Expr::Literal(Value::Number(1.0)),
                Expr::binary(
                    BinaryOperator::Arithmetic(ArithmeticOp::Mul),
                    Expr::Literal(Value::Number(2.0)),
                    Expr::Literal(Value::Number(3.0)),
                ),
            ),
            Expr::Literal(Value::Number(7.0)),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_between_and_not_in() {
        let expr = filter("SELECT * FROM c WHERE c.a BETWEEN 1 AND 5 AND c.b NOT IN (1, 2)");
        match expr {
            Expr::Binary {
                op: BinaryOperator::And,
                left,
                right,
            } => {
                assert!(matches!(*left, Expr::Between { .. }));
                assert!(matches!(
                    *right,
                    Expr::Unary {
                        op: UnaryOperator::Not,
                        ..
                    }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_property_access_forms() {
        let expr = parse(r#"SELECT VALUE c["a"][0].b FROM c"#).unwrap().selection;
        let expected = Expr::property(Expr::property(Expr::property(c(), "a"), 0.0), "b");
        assert_eq!(expr, Selection::Value(expected));
    }

    #[test]
    fn test_keyword_property_names() {
        let expr = parse("SELECT VALUE c.value FROM c").unwrap().selection;
        assert_eq!(expr, Selection::Value(Expr::property(c(), "value")));
    }

    #[test]
    fn test_calls() {
        let expr = filter("SELECT * FROM c WHERE is_defined(c.a) AND udf.check(c.b, @p)");
        match expr {
            Expr::Binary { left, right, .. } => {
                assert_eq!(
                    *left,
                    Expr::Call {
                        name: "IS_DEFINED".into(),
                        args: vec![Expr::property(c(), "a")],
                        udf: false,
                    }
                );
                assert_eq!(
                    *right,
                    Expr::Call {
                        name: "check".into(),
                        args: vec![Expr::property(c(), "b"), Expr::Parameter("@p".into())],
                        udf: true,
                    }
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_literals() {
        let expr = parse(r#"SELECT VALUE {"a": [1, 'x', null, undefined], b: true} FROM c"#)
            .unwrap()
            .selection;
        let expected = Expr::Object(vec![
            (
                "a".into(),
                Expr::Array(vec![
                    Expr::Literal(Value::Number(1.0)),
                    Expr::Literal(Value::from("x")),
                    Expr::Literal(Value::Null),
                    Expr::Literal(Value::Absent),
                ]),
            ),
            ("b".into(), Expr::Literal(Value::Bool(true))),
        ]);
        assert_eq!(expr, Selection::Value(expected));
    }

    #[test]
    fn test_ternary_and_coalesce() {
        let expr = parse("SELECT VALUE c.a ?? c.b ? 1 : 2 FROM c").unwrap().selection;
        match expr {
            Selection::Value(Expr::Conditional { test, .. }) => assert!(matches!(
                *test,
                Expr::Binary {
                    op: BinaryOperator::Coalesce,
                    ..
                }
            )),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse("SELECT * FORM c").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::SyntaxError);
        let pos = err.position().unwrap();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 10);
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(parse("SELECT * FROM c c2 c3").is_err());
        assert!(parse("SELECT * FROM c WHERE").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_order_by_requires_path() {
        let err = parse("SELECT * FROM c ORDER BY 1").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::SyntaxError);
        assert!(parse("SELECT * FROM c ORDER BY c").is_err());
    }

    #[test]
    fn test_deep_parentheses_rejected() {
        let text = format!("SELECT VALUE {}1{} FROM c", "(".repeat(500), ")".repeat(500));
        let err = parse(&text).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::SyntaxError);
        assert_eq!(err.message(), "Expression nested too deeply");
        assert!(err.position().is_some());

        let text = format!("SELECT VALUE {}1{} FROM c", "(".repeat(30), ")".repeat(30));
        assert_eq!(
            parse(&text).unwrap().selection,
            Selection::Value(Expr::Literal(Value::from(1)))
        );
    }

    #[test]
    fn test_deep_prefix_operators_rejected() {
        let text = format!("SELECT * FROM c WHERE {}true", "NOT ".repeat(500));
        assert_eq!(parse(&text).unwrap_err().message(), "Expression nested too deeply");

        let text = format!("SELECT VALUE {}1 FROM c", "- ".repeat(500));
        assert_eq!(parse(&text).unwrap_err().message(), "Expression nested too deeply");
    }

    #[test]
    fn test_long_operator_chain_rejected() {
        let text = format!("SELECT VALUE 1{} FROM c", " + 1".repeat(1000));
        let err = parse(&text).unwrap_err();
        assert_eq!(err.message(), "Expression nested too deeply");
        // reported at the start of the expression
        assert_eq!(err.position().unwrap().column, 14);

        let text = format!("SELECT VALUE 1{} FROM c", " + 1".repeat(100));
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn test_top_requires_integer() {
        assert!(parse("SELECT TOP 1.5 * FROM c").is_err());
        assert!(parse("SELECT TOP x * FROM c").is_err());
    }
}
