//! Conversion options and the nullability annotation tables.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::error::ConfigError;

// ============================================================================
// LANGUAGE VERSION
// ============================================================================

/// A Java language level, identified by its feature release number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JavaVersion(u16);

impl JavaVersion {
    pub const MIN_SUPPORTED: JavaVersion = JavaVersion(1);
    pub const MAX_SUPPORTED: JavaVersion = JavaVersion(24);

    pub const fn new(feature: u16) -> Self {
        JavaVersion(feature)
    }

    pub const fn feature(self) -> u16 {
        self.0
    }

    /// Text blocks became a standard feature in Java 15.
    pub fn supports_text_blocks(self) -> bool {
        self.0 >= 15
    }

    /// `///` Markdown documentation comments, Java 23.
    pub fn supports_markdown_doc_comments(self) -> bool {
        self.0 >= 23
    }
}

impl Default for JavaVersion {
    fn default() -> Self {
        JavaVersion::MAX_SUPPORTED
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts both `"17"` and the legacy `"1.8"` spelling.
impl FromStr for JavaVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let feature = trimmed.strip_prefix("1.").unwrap_or(trimmed);
        let value: u16 = feature
            .parse()
            .map_err(|_| ConfigError::InvalidVersion(s.to_string()))?;
        let version = JavaVersion(value);
        if version < JavaVersion::MIN_SUPPORTED || version > JavaVersion::MAX_SUPPORTED {
            return Err(ConfigError::InvalidVersion(s.to_string()));
        }
        Ok(version)
    }
}

// ============================================================================
// PARSER OPTIONS
// ============================================================================

/// Options for converting one file, also handed to the external frontend.
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub version: JavaVersion,
    /// Whether preview language features are enabled for `version`.
    pub enable_preview: bool,
    /// Archive and directory entries, passed through to the frontend untouched.
    pub classpath: Vec<PathBuf>,
}

impl ParserOptions {
    pub fn new(version: JavaVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn with_preview(mut self, enable: bool) -> Self {
        self.enable_preview = enable;
        self
    }

    pub fn with_classpath(mut self, entries: impl IntoIterator<Item = PathBuf>) -> Self {
        self.classpath.extend(entries);
        self
    }
}

// ============================================================================
// ANALYSIS CONFIG
// ============================================================================

/// Everything a conversion needs besides the source. The nullability
/// tables are shared by every file of a batch.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub parser: ParserOptions,
    pub nullability: Arc<NullabilityConfig>,
}

impl AnalysisConfig {
    pub fn new(parser: ParserOptions) -> Self {
        Self {
            parser,
            ..Self::default()
        }
    }

    pub fn with_nullability(mut self, nullability: NullabilityConfig) -> Self {
        self.nullability = Arc::new(nullability);
        self
    }
}

// ============================================================================
// NULLABILITY TABLES
// ============================================================================

/// Effective nullability of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullabilityType {
    /// No nullability annotation applies.
    NoAnnotation,
    /// An annotation explicitly states nullness is unknown.
    Unknown,
    /// May be null, but callers are not forced to check.
    WeakNullable,
    /// May be null and must be checked (`@CheckForNull`).
    StrongNullable,
    NonNull,
}

impl NullabilityType {
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            NullabilityType::WeakNullable | NullabilityType::StrongNullable
        )
    }
}

/// The kind of declaration whose nullability is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullabilityTarget {
    Parameter,
    Field,
    LocalVariable,
    /// The return value of a method.
    Method,
}

impl NullabilityTarget {
    pub const ALL: &'static [NullabilityTarget] = &[
        NullabilityTarget::Parameter,
        NullabilityTarget::Field,
        NullabilityTarget::LocalVariable,
        NullabilityTarget::Method,
    ];
}

/// A default-nullability annotation placed on a method, class or package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultNullability {
    pub nullability: NullabilityType,
    pub targets: Vec<NullabilityTarget>,
    /// Targets are narrowed by the annotation's `value` argument
    /// (Eclipse `DefaultLocation` constants).
    pub targets_from_value: bool,
}

impl DefaultNullability {
    pub fn new(nullability: NullabilityType, targets: &[NullabilityTarget]) -> Self {
        Self {
            nullability,
            targets: targets.to_vec(),
            targets_from_value: false,
        }
    }
}

/// Annotation names and their nullability meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullabilityConfig {
    annotations: FxHashMap<SmolStr, NullabilityType>,
    defaults: FxHashMap<SmolStr, DefaultNullability>,
}

const NON_NULL_ANNOTATIONS: &[&str] = &[
    "android.annotation.NonNull",
    "android.support.annotation.NonNull",
    "androidx.annotation.NonNull",
    "com.mongodb.lang.NonNull",
    "edu.umd.cs.findbugs.annotations.NonNull",
    "io.reactivex.annotations.NonNull",
    "io.reactivex.rxjava3.annotations.NonNull",
    "jakarta.annotation.Nonnull",
    "javax.annotation.Nonnull",
    "lombok.NonNull",
    "org.checkerframework.checker.nullness.compatqual.NonNullDecl",
    "org.checkerframework.checker.nullness.compatqual.NonNullType",
    "org.checkerframework.checker.nullness.qual.NonNull",
    "org.eclipse.jdt.annotation.NonNull",
    "org.eclipse.jgit.annotations.NonNull",
    "org.jetbrains.annotations.NotNull",
    "org.jmlspecs.annotation.NonNull",
    "org.jspecify.annotations.NonNull",
    "org.jspecify.nullness.NonNull",
    "org.netbeans.api.annotations.common.NonNull",
    "org.springframework.lang.NonNull",
    "reactor.util.annotation.NonNull",
];

const STRONG_NULLABLE_ANNOTATIONS: &[&str] = &[
    "edu.umd.cs.findbugs.annotations.CheckForNull",
    "javax.annotation.CheckForNull",
    "org.eclipse.jdt.annotation.Nullable",
    "org.eclipse.jgit.annotations.Nullable",
    "org.jspecify.annotations.Nullable",
    "org.jspecify.nullness.Nullable",
    "org.netbeans.api.annotations.common.CheckForNull",
    "org.springframework.lang.Nullable",
    "reactor.util.annotation.Nullable",
];

const WEAK_NULLABLE_ANNOTATIONS: &[&str] = &[
    "android.annotation.Nullable",
    "android.support.annotation.Nullable",
    "androidx.annotation.Nullable",
    "com.mongodb.lang.Nullable",
    "edu.umd.cs.findbugs.annotations.Nullable",
    "edu.umd.cs.findbugs.annotations.PossiblyNull",
    "edu.umd.cs.findbugs.annotations.UnknownNullness",
    "io.reactivex.annotations.Nullable",
    "io.reactivex.rxjava3.annotations.Nullable",
    "jakarta.annotation.Nullable",
    "javax.annotation.Nullable",
    "org.checkerframework.checker.nullness.compatqual.NullableDecl",
    "org.checkerframework.checker.nullness.compatqual.NullableType",
    "org.checkerframework.checker.nullness.qual.Nullable",
    "org.jetbrains.annotations.Nullable",
    "org.jmlspecs.annotation.Nullable",
    "org.netbeans.api.annotations.common.NullAllowed",
    "org.netbeans.api.annotations.common.NullUnknown",
];

impl Default for NullabilityConfig {
    fn default() -> Self {
        use NullabilityTarget::{Field, Method, Parameter};

        let mut config = Self::empty();
        for name in NON_NULL_ANNOTATIONS {
            config.add_annotation(*name, NullabilityType::NonNull);
        }
        for name in STRONG_NULLABLE_ANNOTATIONS {
            config.add_annotation(*name, NullabilityType::StrongNullable);
        }
        for name in WEAK_NULLABLE_ANNOTATIONS {
            config.add_annotation(*name, NullabilityType::WeakNullable);
        }

        let non_null_api = DefaultNullability::new(NullabilityType::NonNull, &[Parameter, Method]);
        config.add_default(
            "javax.annotation.ParametersAreNonnullByDefault",
            DefaultNullability::new(NullabilityType::NonNull, &[Parameter]),
        );
        config.add_default(
            "javax.annotation.ParametersAreNullableByDefault",
            DefaultNullability::new(NullabilityType::WeakNullable, &[Parameter]),
        );
        config.add_default("org.springframework.lang.NonNullApi", non_null_api.clone());
        config.add_default("reactor.util.annotation.NonNullApi", non_null_api.clone());
        config.add_default("com.mongodb.lang.NonNullApi", non_null_api);
        config.add_default(
            "org.springframework.lang.NonNullFields",
            DefaultNullability::new(NullabilityType::NonNull, &[Field]),
        );
        for name in [
            "org.jspecify.annotations.NullMarked",
            "org.jspecify.nullness.NullMarked",
        ] {
            config.add_default(
                name,
                DefaultNullability::new(NullabilityType::NonNull, NullabilityTarget::ALL),
            );
        }
        config.add_default(
            "org.jspecify.annotations.NullUnmarked",
            DefaultNullability::new(NullabilityType::Unknown, NullabilityTarget::ALL),
        );
        config.add_default(
            "org.eclipse.jdt.annotation.NonNullByDefault",
            DefaultNullability {
                nullability: NullabilityType::NonNull,
                targets: vec![Parameter, Method, Field],
                targets_from_value: true,
            },
        );
        config
    }
}

impl NullabilityConfig {
    /// A configuration that recognizes no annotation at all.
    pub fn empty() -> Self {
        Self {
            annotations: FxHashMap::default(),
            defaults: FxHashMap::default(),
        }
    }

    /// Map a fully-qualified annotation name to a nullability meaning.
    pub fn add_annotation(&mut self, name: impl Into<SmolStr>, nullability: NullabilityType) {
        self.annotations.insert(name.into(), nullability);
    }

    pub fn with_annotation(mut self, name: impl Into<SmolStr>, nullability: NullabilityType) -> Self {
        self.add_annotation(name, nullability);
        self
    }

    /// Register a default-nullability annotation.
    pub fn add_default(&mut self, name: impl Into<SmolStr>, default: DefaultNullability) {
        self.defaults.insert(name.into(), default);
    }

    pub fn annotation(&self, name: &str) -> Option<NullabilityType> {
        self.annotations.get(name).copied()
    }

    pub fn default_annotation(&self, name: &str) -> Option<&DefaultNullability> {
        self.defaults.get(name)
    }

    /// Whether the name has any meaning in this configuration.
    pub fn recognizes(&self, name: &str) -> bool {
        self.annotations.contains_key(name) || self.defaults.contains_key(name)
    }
}
