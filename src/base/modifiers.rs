//! Declaration modifier flags.

use bitflags::bitflags;

bitflags! {
    /// Modifiers of a declared entity, as reported by the resolver or
    /// written in source.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        const SYNCHRONIZED = 1 << 6;
        const NATIVE = 1 << 7;
        const TRANSIENT = 1 << 8;
        const VOLATILE = 1 << 9;
        const STRICTFP = 1 << 10;
        const DEFAULT = 1 << 11;
        const SEALED = 1 << 12;
        const NON_SEALED = 1 << 13;
        const DEPRECATED = 1 << 14;
    }
}

impl Modifiers {
    /// Flag for a modifier keyword as written in source.
    pub fn from_keyword(keyword: &str) -> Option<Modifiers> {
        let flag = match keyword {
            "public" => Modifiers::PUBLIC,
            "protected" => Modifiers::PROTECTED,
            "private" => Modifiers::PRIVATE,
            "static" => Modifiers::STATIC,
            "final" => Modifiers::FINAL,
            "abstract" => Modifiers::ABSTRACT,
            "synchronized" => Modifiers::SYNCHRONIZED,
            "native" => Modifiers::NATIVE,
            "transient" => Modifiers::TRANSIENT,
            "volatile" => Modifiers::VOLATILE,
            "strictfp" => Modifiers::STRICTFP,
            "default" => Modifiers::DEFAULT,
            "sealed" => Modifiers::SEALED,
            "non-sealed" => Modifiers::NON_SEALED,
            _ => return None,
        };
        Some(flag)
    }

    /// Neither public, protected nor private.
    pub fn is_package_private(self) -> bool {
        !self.intersects(Modifiers::PUBLIC | Modifiers::PROTECTED | Modifiers::PRIVATE)
    }
}
