//! TypeScript annotations, types and declarations.
//!
//! Only reached when the `typescript` feature is on; with it off, the first
//! annotation or declaration reports `FeatureDisabled`.

use esfront_ast::node::*;
use esfront_ast::node_type::NodeType;
use esfront_ast::token_kind::TokenKind;
use esfront_ast::types::*;
use esfront_core::text::TextRange;

use crate::parser::{PResult, Parser};
use crate::utilities::{can_start_property_key, can_start_type};

impl<'a> Parser<'a> {
    // ========================================================================
    // Annotations
    // ========================================================================

    /// The `?`, `!` and `: T` that may follow a binding.
    pub(crate) fn parse_binding_type_info(&mut self, allow_optional: bool, allow_definite: bool) -> PResult<TypInfo<'a>> {
        let mut info = TypInfo::default();
        if !self.is_ts() {
            if self.at(TokenKind::Colon) {
                return Err(self.feature_disabled("Type annotations", "typescript"));
            }
            return Ok(info);
        }
        if allow_optional && self.eat(TokenKind::Question) {
            info.optional = true;
        }
        if allow_definite && !self.has_line_break_before() && self.eat(TokenKind::Bang) {
            info.definite = true;
        }
        if self.eat(TokenKind::Colon) {
            info.annotation = Some(self.parse_type()?);
        }
        Ok(info)
    }

    pub(crate) fn parse_return_type_annotation(&mut self) -> PResult<Option<TsType<'a>>> {
        if !self.at(TokenKind::Colon) {
            return Ok(None);
        }
        if !self.is_ts() {
            return Err(self.feature_disabled("Type annotations", "typescript"));
        }
        self.bump();
        Ok(Some(self.parse_type()?))
    }

    // ========================================================================
    // Type parameters and arguments
    // ========================================================================

    /// `<T, U extends V = W>`. A trailing comma is allowed (`<T,>`).
    pub(crate) fn parse_type_params(&mut self) -> PResult<&'a [TsTypeParam<'a>]> {
        self.expect(TokenKind::Lt)?;
        let mut params = self.new_vec();
        loop {
            let start = self.peek_start();
            let name = self.parse_identifier()?;
            let constraint = if self.eat(TokenKind::Extends) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(TsTypeParam {
                data: self.node(NodeType::TsTypeParam, start),
                name,
                constraint,
                default,
            });
            if !self.eat(TokenKind::Comma) || self.at(TokenKind::Gt) {
                break;
            }
        }
        self.expect(TokenKind::Gt)?;
        Ok(params.into_bump_slice())
    }

    /// `<A, B>`. The lexer never merges `>` here, so `A<B<C>>` closes with
    /// two tokens.
    pub(crate) fn parse_type_args(&mut self) -> PResult<&'a [TsType<'a>]> {
        self.expect(TokenKind::Lt)?;
        let mut args = self.new_vec();
        loop {
            args.push(self.parse_type()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Gt)?;
        Ok(args.into_bump_slice())
    }

    // ========================================================================
    // Types
    // ========================================================================

    pub(crate) fn parse_type(&mut self) -> PResult<TsType<'a>> {
        if !can_start_type(self.peek_kind()) {
            return Err(self.unexpected());
        }
        if self.at(TokenKind::Lt) {
            return self.parse_fn_type();
        }
        if self.at(TokenKind::LParen) {
            if let Some(fn_type) = self.try_parse(|p| p.parse_fn_type()) {
                return Ok(fn_type);
            }
        }
        self.parse_union_type()
    }

    /// `<T>(a: T) => U`.
    fn parse_fn_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.peek_start();
        let type_params = if self.at(TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        let params = self.parse_formal_params(false)?;
        self.expect(TokenKind::Arrow)?;
        let ret = self.parse_type()?;
        Ok(TsType::Fn(self.alloc(TsFnType {
            data: self.node(NodeType::TsFnType, start),
            type_params,
            params,
            ret,
        })))
    }

    /// `A | B`, with an optional leading `|`.
    fn parse_union_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.peek_start();
        let leading = self.eat(TokenKind::BitOr);
        let first = self.parse_intersection_type()?;
        if !leading && !self.at(TokenKind::BitOr) {
            return Ok(first);
        }
        let mut types = self.new_vec();
        types.push(first);
        while self.eat(TokenKind::BitOr) {
            types.push(self.parse_intersection_type()?);
        }
        Ok(TsType::Union(self.alloc(TsUnionType {
            data: self.node(NodeType::TsUnionType, start),
            types: types.into_bump_slice(),
        })))
    }

    fn parse_intersection_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.peek_start();
        let leading = self.eat(TokenKind::BitAnd);
        let first = self.parse_type_operator()?;
        if !leading && !self.at(TokenKind::BitAnd) {
            return Ok(first);
        }
        let mut types = self.new_vec();
        types.push(first);
        while self.eat(TokenKind::BitAnd) {
            types.push(self.parse_type_operator()?);
        }
        Ok(TsType::Intersection(self.alloc(TsIntersectionType {
            data: self.node(NodeType::TsIntersectionType, start),
            types: types.into_bump_slice(),
        })))
    }

    fn parse_type_operator(&mut self) -> PResult<TsType<'a>> {
        if !self.at(TokenKind::Keyof) {
            return self.parse_postfix_type();
        }
        let start = self.peek_start();
        self.bump();
        let type_ann = self.parse_type_operator()?;
        Ok(TsType::Operator(self.alloc(TsTypeOperator {
            data: self.node(NodeType::TsTypeOperator, start),
            op: TsTypeOperatorKind::KeyOf,
            type_ann,
        })))
    }

    /// `T[]` and `T[K]`. A `[` on the next line is not a postfix.
    fn parse_postfix_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.peek_start();
        let mut ty = self.parse_primary_type()?;
        while self.at(TokenKind::LBracket) && !self.has_line_break_before() {
            self.bump();
            if self.eat(TokenKind::RBracket) {
                ty = TsType::Array(self.alloc(TsArrayType {
                    data: self.node(NodeType::TsArrayType, start),
                    elem: ty,
                }));
                continue;
            }
            let index = self.parse_type()?;
            self.expect(TokenKind::RBracket)?;
            ty = TsType::IndexedAccess(self.alloc(TsIndexedAccessType {
                data: self.node(NodeType::TsIndexedAccessType, start),
                object: ty,
                index,
            }));
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.peek_start();
        let kind = self.peek_kind();
        match kind {
            TokenKind::LParen => {
                self.bump();
                let type_ann = self.parse_type()?;
                self.expect(TokenKind::RParen)?;
                Ok(TsType::Paren(self.alloc(TsParenType {
                    data: self.node(NodeType::TsParenType, start),
                    type_ann,
                })))
            }
            TokenKind::LBracket => {
                self.bump();
                let mut elems = self.new_vec();
                while !self.at(TokenKind::RBracket) {
                    elems.push(self.parse_type()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBracket)?;
                Ok(TsType::Tuple(self.alloc(TsTupleType {
                    data: self.node(NodeType::TsTupleType, start),
                    elems: elems.into_bump_slice(),
                })))
            }
            TokenKind::LBrace => {
                let members = self.parse_type_members()?;
                Ok(TsType::TypeLit(self.alloc(TsTypeLit {
                    data: self.node(NodeType::TsTypeLit, start),
                    members,
                })))
            }
            TokenKind::Typeof => {
                self.bump();
                let expr = self.parse_entity_name()?;
                Ok(TsType::Query(self.alloc(TsTypeQuery {
                    data: self.node(NodeType::TsTypeQuery, start),
                    expr,
                })))
            }
            TokenKind::Void | TokenKind::Null | TokenKind::This => {
                let token = self.bump();
                let kind = match token.kind {
                    TokenKind::Void => TsKeywordKind::Void,
                    TokenKind::Null => TsKeywordKind::Null,
                    _ => TsKeywordKind::This,
                };
                Ok(self.keyword_type(token.range, kind))
            }
            TokenKind::String => {
                let lit = Expression::Str(self.parse_string_lit()?);
                Ok(self.lit_type(start, lit))
            }
            TokenKind::Num => {
                let lit = Expression::Num(self.parse_num_lit()?);
                Ok(self.lit_type(start, lit))
            }
            TokenKind::BigInt => {
                let lit = Expression::BigInt(self.parse_bigint_lit()?);
                Ok(self.lit_type(start, lit))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.bump();
                let lit = Expression::Bool(self.alloc(BoolLit {
                    data: NodeData::new(NodeType::BoolLit, token.range),
                    value: token.kind == TokenKind::True,
                }));
                Ok(self.lit_type(start, lit))
            }
            TokenKind::Minus => {
                self.bump();
                let arg = match self.peek_kind() {
                    TokenKind::Num => Expression::Num(self.parse_num_lit()?),
                    TokenKind::BigInt => Expression::BigInt(self.parse_bigint_lit()?),
                    _ => return Err(self.unexpected()),
                };
                let lit = Expression::Unary(self.alloc(UnaryExpr {
                    data: self.node(NodeType::UnaryExpr, start),
                    op: UnaryOp::Minus,
                    arg,
                }));
                Ok(self.lit_type(start, lit))
            }
            kind if kind.is_identifier_like() => {
                let keyword = TsKeywordKind::from_name(self.peek().raw);
                if let Some(keyword) = keyword {
                    if self.peek2_kind() != TokenKind::Dot {
                        let token = self.bump();
                        return Ok(self.keyword_type(token.range, keyword));
                    }
                }
                let name = self.parse_entity_name()?;
                let type_args = if self.at(TokenKind::Lt) && !self.has_line_break_before() {
                    Some(self.parse_type_args()?)
                } else {
                    None
                };
                Ok(TsType::Ref(self.alloc(TsTypeRef {
                    data: self.node(NodeType::TsTypeRef, start),
                    name,
                    type_args,
                })))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn keyword_type(&self, range: TextRange, kind: TsKeywordKind) -> TsType<'a> {
        TsType::Keyword(self.alloc(TsKeywordType {
            data: NodeData::new(NodeType::TsKeywordType, range),
            kind,
        }))
    }

    fn lit_type(&self, start: u32, lit: Expression<'a>) -> TsType<'a> {
        TsType::Lit(self.alloc(TsLitType {
            data: self.node(NodeType::TsLitType, start),
            lit,
        }))
    }

    /// `a`, `a.b.c`.
    fn parse_entity_name(&mut self) -> PResult<TsEntityName<'a>> {
        let start = self.peek_start();
        if !self.peek_kind().is_identifier_like() {
            return Err(self.unexpected());
        }
        let token = self.bump();
        let mut name = TsEntityName::Ident(self.ident_from_token(&token));
        while self.eat(TokenKind::Dot) {
            let right = self.parse_identifier_name()?;
            name = TsEntityName::Qualified(self.alloc(TsQualifiedName {
                data: self.node(NodeType::TsQualifiedName, start),
                left: name,
                right,
            }));
        }
        Ok(name)
    }

    // ========================================================================
    // Type members
    // ========================================================================

    /// `{ a: T; b?(): U, [k: string]: V }`. Members are separated by `;`,
    /// `,` or a line break.
    fn parse_type_members(&mut self) -> PResult<&'a [TsTypeElement<'a>]> {
        self.expect(TokenKind::LBrace)?;
        let mut members = self.new_vec();
        while !self.at(TokenKind::RBrace) {
            members.push(self.parse_type_member()?);
            let separated = self.eat(TokenKind::Semi) || self.eat(TokenKind::Comma);
            if !separated && !self.at(TokenKind::RBrace) && !self.has_line_break_before() {
                return Err(self.unexpected());
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(members.into_bump_slice())
    }

    fn at_index_signature(&mut self) -> bool {
        self.at(TokenKind::LBracket)
            && self.look_ahead(|p| {
                p.bump();
                if !p.peek_kind().is_identifier_like() {
                    return false;
                }
                p.bump();
                p.at(TokenKind::Colon)
            })
    }

    fn parse_type_member(&mut self) -> PResult<TsTypeElement<'a>> {
        let start = self.peek_start();
        let readonly = self.at(TokenKind::Readonly) && {
            let next = self.peek2_kind();
            can_start_property_key(next) && !matches!(next, TokenKind::Colon | TokenKind::Question)
        };
        if readonly {
            self.bump();
        }

        if self.at_index_signature() {
            self.bump();
            let param_start = self.peek_start();
            let name = self.parse_identifier()?;
            self.expect(TokenKind::Colon)?;
            let key_type = self.parse_type()?;
            let param = self.alloc(Identifier {
                data: self.node(NodeType::Identifier, param_start),
                name: name.name,
                typ: self.typ(TypInfo {
                    annotation: Some(key_type),
                    ..TypInfo::default()
                }),
            });
            self.expect(TokenKind::RBracket)?;
            self.expect(TokenKind::Colon)?;
            let type_ann = self.parse_type()?;
            return Ok(TsTypeElement::Index(self.alloc(TsIndexSig {
                data: self.node(NodeType::TsIndexSig, start),
                param,
                type_ann,
                readonly,
            })));
        }

        let key = self.parse_property_key(false)?;
        let optional = self.eat(TokenKind::Question);
        if self.at(TokenKind::LParen) || self.at(TokenKind::Lt) {
            let type_params = if self.at(TokenKind::Lt) {
                Some(self.parse_type_params()?)
            } else {
                None
            };
            let params = self.parse_formal_params(false)?;
            let annotation = if self.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let typ = self.typ(TypInfo {
                type_params,
                annotation,
                ..TypInfo::default()
            });
            return Ok(TsTypeElement::Method(self.alloc(TsMethodSig {
                data: self.node(NodeType::TsMethodSig, start),
                key,
                optional,
                params,
                typ,
            })));
        }

        let type_ann = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(TsTypeElement::Prop(self.alloc(TsPropSig {
            data: self.node(NodeType::TsPropSig, start),
            key,
            optional,
            readonly,
            type_ann,
        })))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// `A<T>, B.C` in `extends` and `implements` clauses.
    pub(crate) fn parse_heritage_list(&mut self) -> PResult<&'a [TsExprWithTypeArgs<'a>]> {
        let mut list = self.new_vec();
        loop {
            let start = self.peek_start();
            let expr = self.parse_entity_name()?;
            let type_args = if self.at(TokenKind::Lt) {
                Some(self.parse_type_args()?)
            } else {
                None
            };
            list.push(TsExprWithTypeArgs {
                data: self.node(NodeType::TsExprWithTypeArgs, start),
                expr,
                type_args,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(list.into_bump_slice())
    }

    pub(crate) fn parse_type_alias_declaration(&mut self, start: u32) -> PResult<Statement<'a>> {
        self.expect(TokenKind::Type)?;
        let id = self.parse_identifier()?;
        let type_params = if self.at(TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        self.expect(TokenKind::Eq)?;
        let type_ann = self.parse_type()?;
        self.semicolon()?;
        Ok(Statement::TsTypeAlias(self.alloc(TsTypeAliasDecl {
            data: self.node(NodeType::TsTypeAliasDecl, start),
            id,
            type_params,
            type_ann,
        })))
    }

    pub(crate) fn parse_interface_declaration(&mut self, start: u32) -> PResult<&'a TsInterfaceDecl<'a>> {
        self.expect(TokenKind::Interface)?;
        let id = self.parse_identifier()?;
        let type_params = if self.at(TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        let extends = if self.eat(TokenKind::Extends) {
            self.parse_heritage_list()?
        } else {
            &[]
        };
        let body = self.parse_type_members()?;
        Ok(self.alloc(TsInterfaceDecl {
            data: self.node(NodeType::TsInterfaceDecl, start),
            id,
            type_params,
            extends,
            body,
        }))
    }

    /// `enum E { A, B = 2, "c" }`, after any `const`.
    pub(crate) fn parse_enum_declaration(&mut self, start: u32, is_const: bool) -> PResult<Statement<'a>> {
        self.expect(TokenKind::Enum)?;
        let id = self.parse_identifier()?;
        self.expect(TokenKind::LBrace)?;
        let mut members = self.new_vec();
        while !self.at(TokenKind::RBrace) {
            let member_start = self.peek_start();
            let id = match self.peek_kind() {
                TokenKind::String => PropKey::Str(self.parse_string_lit()?),
                kind if kind.is_identifier_name() => PropKey::Ident(self.parse_identifier_name()?),
                _ => return Err(self.unexpected()),
            };
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            members.push(TsEnumMember {
                data: self.node(NodeType::TsEnumMember, member_start),
                id,
                init,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Statement::TsEnum(self.alloc(TsEnumDecl {
            data: self.node(NodeType::TsEnumDecl, start),
            id,
            is_const,
            members: members.into_bump_slice(),
        })))
    }
}
