//! Closed enumeration of atom types and their class hierarchy.
//!
//! Every atom carries one `Type`. The hierarchy is closed-world: each type
//! has at most one parent, and `is_a` walks the parent chain. The walker
//! only cares about a handful of families (`FunctionLink`, `FoldLink`,
//! `ScopeLink`, ...), every other type is treated as plain data.

use std::fmt;

/// Atom type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    // Nodes
    Node,
    ConceptNode,
    PredicateNode,
    SchemaNode,
    NumberNode,
    TypeNode,
    VariableNode,
    GlobNode,
    GroundedSchemaNode,
    GroundedPredicateNode,
    DefinedSchemaNode,
    DefinedPredicateNode,

    // Links
    Link,
    ListLink,
    SetLink,
    MemberLink,
    InheritanceLink,
    EvaluationLink,
    ExecutionLink,
    DefineLink,
    QuoteLink,
    UnquoteLink,
    VariableList,
    TypedVariableLink,
    ScopeLink,
    LambdaLink,
    PutLink,
    GetLink,
    FreeLink,
    DeleteLink,
    FunctionLink,
    ExecutionOutputLink,
    ArityLink,
    ConcatLink,
    FoldLink,
    ArithmeticLink,
    PlusLink,
    TimesLink,
    MinusLink,
    DivideLink,
    AndLink,
    OrLink,
    NotLink,
    TrueLink,
    FalseLink,
}

impl Type {
    /// Immediate parent in the class hierarchy. `Node` and `Link` are roots.
    pub fn parent(self) -> Option<Type> {
        use Type::*;
        let parent = match self {
            Node | Link => return None,

            ConceptNode | PredicateNode | SchemaNode | NumberNode | TypeNode | VariableNode
            | GlobNode => Node,
            GroundedPredicateNode | DefinedPredicateNode => PredicateNode,
            GroundedSchemaNode | DefinedSchemaNode => SchemaNode,

            ListLink | SetLink | MemberLink | InheritanceLink | EvaluationLink | ExecutionLink
            | DefineLink | QuoteLink | UnquoteLink | VariableList | TypedVariableLink
            | ScopeLink | FreeLink | AndLink | OrLink | NotLink | TrueLink | FalseLink => Link,
            LambdaLink | PutLink | GetLink => ScopeLink,
            DeleteLink | FunctionLink => FreeLink,
            ExecutionOutputLink | ArityLink | ConcatLink | FoldLink => FunctionLink,
            ArithmeticLink => FoldLink,
            PlusLink | TimesLink | MinusLink | DivideLink => ArithmeticLink,
        };
        Some(parent)
    }

    /// Reflexive, transitive subtype test.
    pub fn is_a(self, family: Type) -> bool {
        let mut current = Some(self);
        while let Some(t) = current {
            if t == family {
                return true;
            }
            current = t.parent();
        }
        false
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self.is_a(Type::Node)
    }

    #[inline]
    pub fn is_link(self) -> bool {
        self.is_a(Type::Link)
    }

    /// `VariableNode` or `GlobNode`.
    #[inline]
    pub fn is_variable(self) -> bool {
        matches!(self, Type::VariableNode | Type::GlobNode)
    }

    /// Inverse of [`Type::name`], as used by `TypeNode` names.
    pub fn from_name(name: &str) -> Option<Type> {
        use Type::*;
        let ty = match name {
            "Node" => Node,
            "ConceptNode" => ConceptNode,
            "PredicateNode" => PredicateNode,
            "SchemaNode" => SchemaNode,
            "NumberNode" => NumberNode,
            "TypeNode" => TypeNode,
            "VariableNode" => VariableNode,
            "GlobNode" => GlobNode,
            "GroundedSchemaNode" => GroundedSchemaNode,
            "GroundedPredicateNode" => GroundedPredicateNode,
            "DefinedSchemaNode" => DefinedSchemaNode,
            "DefinedPredicateNode" => DefinedPredicateNode,
            "Link" => Link,
            "ListLink" => ListLink,
            "SetLink" => SetLink,
            "MemberLink" => MemberLink,
            "InheritanceLink" => InheritanceLink,
            "EvaluationLink" => EvaluationLink,
            "ExecutionLink" => ExecutionLink,
            "DefineLink" => DefineLink,
            "QuoteLink" => QuoteLink,
            "UnquoteLink" => UnquoteLink,
            "VariableList" => VariableList,
            "TypedVariableLink" => TypedVariableLink,
            "ScopeLink" => ScopeLink,
            "LambdaLink" => LambdaLink,
            "PutLink" => PutLink,
            "GetLink" => GetLink,
            "FreeLink" => FreeLink,
            "DeleteLink" => DeleteLink,
            "FunctionLink" => FunctionLink,
            "ExecutionOutputLink" => ExecutionOutputLink,
            "ArityLink" => ArityLink,
            "ConcatLink" => ConcatLink,
            "FoldLink" => FoldLink,
            "ArithmeticLink" => ArithmeticLink,
            "PlusLink" => PlusLink,
            "TimesLink" => TimesLink,
            "MinusLink" => MinusLink,
            "DivideLink" => DivideLink,
            "AndLink" => AndLink,
            "OrLink" => OrLink,
            "NotLink" => NotLink,
            "TrueLink" => TrueLink,
            "FalseLink" => FalseLink,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(self) -> &'static str {
        use Type::*;
        match self {
            Node => "Node",
            ConceptNode => "ConceptNode",
            PredicateNode => "PredicateNode",
            SchemaNode => "SchemaNode",
            NumberNode => "NumberNode",
            TypeNode => "TypeNode",
            VariableNode => "VariableNode",
            GlobNode => "GlobNode",
            GroundedSchemaNode => "GroundedSchemaNode",
            GroundedPredicateNode => "GroundedPredicateNode",
            DefinedSchemaNode => "DefinedSchemaNode",
            DefinedPredicateNode => "DefinedPredicateNode",
            Link => "Link",
            ListLink => "ListLink",
            SetLink => "SetLink",
            MemberLink => "MemberLink",
            InheritanceLink => "InheritanceLink",
            EvaluationLink => "EvaluationLink",
            ExecutionLink => "ExecutionLink",
            DefineLink => "DefineLink",
            QuoteLink => "QuoteLink",
            UnquoteLink => "UnquoteLink",
            VariableList => "VariableList",
            TypedVariableLink => "TypedVariableLink",
            ScopeLink => "ScopeLink",
            LambdaLink => "LambdaLink",
            PutLink => "PutLink",
            GetLink => "GetLink",
            FreeLink => "FreeLink",
            DeleteLink => "DeleteLink",
            FunctionLink => "FunctionLink",
            ExecutionOutputLink => "ExecutionOutputLink",
            ArityLink => "ArityLink",
            ConcatLink => "ConcatLink",
            FoldLink => "FoldLink",
            ArithmeticLink => "ArithmeticLink",
            PlusLink => "PlusLink",
            TimesLink => "TimesLink",
            MinusLink => "MinusLink",
            DivideLink => "DivideLink",
            AndLink => "AndLink",
            OrLink => "OrLink",
            NotLink => "NotLink",
            TrueLink => "TrueLink",
            FalseLink => "FalseLink",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
