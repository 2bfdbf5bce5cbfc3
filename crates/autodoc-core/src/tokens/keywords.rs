//! Keyword tables.
//!
//! Every keyword category is a closed enum. [`Keyword::lookup`] is the one
//! place where tag names are mapped to behavior; adding a keyword means adding
//! a variant here, and the compiler then points at every match that must
//! handle it.

use std::fmt;

use serde::Serialize;

/// Keywords that introduce a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKeyword {
    Decl,
    Class,
    EndClass,
    Module,
    EndModule,
}

impl MetaKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaKeyword::Decl => "decl",
            MetaKeyword::Class => "class",
            MetaKeyword::EndClass => "endclass",
            MetaKeyword::Module => "module",
            MetaKeyword::EndModule => "endmodule",
        }
    }

    /// For `@endclass`/`@endmodule`, the keyword that opened the scope.
    pub fn opener(self) -> Option<MetaKeyword> {
        match self {
            MetaKeyword::EndClass => Some(MetaKeyword::Class),
            MetaKeyword::EndModule => Some(MetaKeyword::Module),
            _ => None,
        }
    }

    /// Whether this keyword opens a named scope.
    pub fn opens_scope(self) -> bool {
        matches!(self, MetaKeyword::Class | MetaKeyword::Module)
    }
}

/// Keywords that start a named body section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterKeyword {
    Param,
    Return,
    Returns,
    Throws,
    SeeAlso,
    Example,
    Note,
    Deprecated,
    Bugs,
}

impl DelimiterKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            DelimiterKeyword::Param => "param",
            DelimiterKeyword::Return => "return",
            DelimiterKeyword::Returns => "returns",
            DelimiterKeyword::Throws => "throws",
            DelimiterKeyword::SeeAlso => "seealso",
            DelimiterKeyword::Example => "example",
            DelimiterKeyword::Note => "note",
            DelimiterKeyword::Deprecated => "deprecated",
            DelimiterKeyword::Bugs => "bugs",
        }
    }
}

/// Paired container keywords: `@dl`/`@enddl` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockFamily {
    Dl,
    Mapping,
    Array,
}

impl BlockFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockFamily::Dl => "dl",
            BlockFamily::Mapping => "mapping",
            BlockFamily::Array => "array",
        }
    }

    /// The item keyword this family expects for its children.
    pub fn item_keyword(self) -> ItemKeyword {
        match self {
            BlockFamily::Dl => ItemKeyword::Item,
            BlockFamily::Mapping => ItemKeyword::Member,
            BlockFamily::Array => ItemKeyword::Index,
        }
    }
}

/// Family-specific child keywords of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKeyword {
    Item,
    Member,
    Index,
}

impl ItemKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKeyword::Item => "item",
            ItemKeyword::Member => "member",
            ItemKeyword::Index => "index",
        }
    }

    pub fn family(self) -> BlockFamily {
        match self {
            ItemKeyword::Item => BlockFamily::Dl,
            ItemKeyword::Member => BlockFamily::Mapping,
            ItemKeyword::Index => BlockFamily::Array,
        }
    }
}

/// Inline styling spans, `@i{...@}` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    #[serde(rename = "i")]
    Italic,
    #[serde(rename = "b")]
    Bold,
    #[serde(rename = "tt")]
    Teletype,
    Ref,
    Xml,
}

impl MarkupKind {
    pub const ALL: [MarkupKind; 5] = [
        MarkupKind::Italic,
        MarkupKind::Bold,
        MarkupKind::Teletype,
        MarkupKind::Ref,
        MarkupKind::Xml,
    ];

    /// Literal closer shared by every short markup keyword.
    pub const CLOSE: &'static str = "@}";

    pub fn as_str(self) -> &'static str {
        match self {
            MarkupKind::Italic => "i",
            MarkupKind::Bold => "b",
            MarkupKind::Teletype => "tt",
            MarkupKind::Ref => "ref",
            MarkupKind::Xml => "xml",
        }
    }

    /// The full opener, e.g. `@tt{`.
    pub fn opener(self) -> &'static str {
        match self {
            MarkupKind::Italic => "@i{",
            MarkupKind::Bold => "@b{",
            MarkupKind::Teletype => "@tt{",
            MarkupKind::Ref => "@ref{",
            MarkupKind::Xml => "@xml{",
        }
    }
}

/// A keyword that must stand alone at the start of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Meta(MetaKeyword),
    Delimiter(DelimiterKeyword),
    Block(BlockFamily),
    EndBlock(BlockFamily),
    Item(ItemKeyword),
}

impl Keyword {
    /// Looks up a line keyword by its tag name (without the `@`).
    pub fn lookup(name: &str) -> Option<Keyword> {
        use Keyword::*;
        let kw = match name {
            "decl" => Meta(MetaKeyword::Decl),
            "class" => Meta(MetaKeyword::Class),
            "endclass" => Meta(MetaKeyword::EndClass),
            "module" => Meta(MetaKeyword::Module),
            "endmodule" => Meta(MetaKeyword::EndModule),
            "param" => Delimiter(DelimiterKeyword::Param),
            "return" => Delimiter(DelimiterKeyword::Return),
            "returns" => Delimiter(DelimiterKeyword::Returns),
            "throws" => Delimiter(DelimiterKeyword::Throws),
            "seealso" => Delimiter(DelimiterKeyword::SeeAlso),
            "example" => Delimiter(DelimiterKeyword::Example),
            "note" => Delimiter(DelimiterKeyword::Note),
            "deprecated" => Delimiter(DelimiterKeyword::Deprecated),
            "bugs" => Delimiter(DelimiterKeyword::Bugs),
            "dl" => Block(BlockFamily::Dl),
            "enddl" => EndBlock(BlockFamily::Dl),
            "mapping" => Block(BlockFamily::Mapping),
            "endmapping" => EndBlock(BlockFamily::Mapping),
            "array" => Block(BlockFamily::Array),
            "endarray" => EndBlock(BlockFamily::Array),
            "item" => Item(ItemKeyword::Item),
            "member" => Item(ItemKeyword::Member),
            "index" => Item(ItemKeyword::Index),
            _ => return None,
        };
        Some(kw)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(MetaKeyword, DelimiterKeyword, BlockFamily, ItemKeyword, MarkupKind);
