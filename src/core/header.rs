//! The closed table of recognized status-file headers.
//!
//! dpkg writes fields as `Header-Case: value`; the query API addresses
//! them by a lower-camel canonical id (`Pre-Depends` becomes `preDepends`).
//! Both spellings resolve through this table and nothing else does: an
//! unrecognized header is a hard parse error, never silently ignored.

use std::fmt;

/// A recognized status-file field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Package,
    Status,
    Priority,
    Section,
    InstalledSize,
    Maintainer,
    Architecture,
    MultiArch,
    Source,
    Version,
    Depends,
    Description,
    Homepage,
    OriginalMaintainer,
    Replaces,
    Breaks,
    Enhances,
    Provides,
    Conflicts,
    Recommends,
    Conffiles,
    Suggests,
    PreDepends,
    Essential,
    BuiltUsing,
    Origin,
    Bugs,
}

/// How a field's raw value decodes into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Opaque string
    Scalar,
    /// Comma-separated list of plain strings
    List,
    /// Comma-separated list of `name (constraint)` items, `|` alternatives
    PackageVersions,
    /// RFC-5322-ish address list
    Emails,
    /// Summary line plus wrapped verbose text
    Description,
    /// Newline-separated `path hash` pairs
    Conffiles,
}

impl FieldName {
    /// Every recognized field, in the canonical table order.
    pub const ALL: [FieldName; 27] = [
        FieldName::Package,
        FieldName::Status,
        FieldName::Priority,
        FieldName::Section,
        FieldName::InstalledSize,
        FieldName::Maintainer,
        FieldName::Architecture,
        FieldName::MultiArch,
        FieldName::Source,
        FieldName::Version,
        FieldName::Depends,
        FieldName::Description,
        FieldName::Homepage,
        FieldName::OriginalMaintainer,
        FieldName::Replaces,
        FieldName::Breaks,
        FieldName::Enhances,
        FieldName::Provides,
        FieldName::Conflicts,
        FieldName::Recommends,
        FieldName::Conffiles,
        FieldName::Suggests,
        FieldName::PreDepends,
        FieldName::Essential,
        FieldName::BuiltUsing,
        FieldName::Origin,
        FieldName::Bugs,
    ];

    /// Look up a field by its `Header-Case` name, case-sensitively.
    pub fn from_header(header: &str) -> Option<FieldName> {
        match header {
            "Package" => Some(FieldName::Package),
            "Status" => Some(FieldName::Status),
            "Priority" => Some(FieldName::Priority),
            "Section" => Some(FieldName::Section),
            "Installed-Size" => Some(FieldName::InstalledSize),
            "Maintainer" => Some(FieldName::Maintainer),
            "Architecture" => Some(FieldName::Architecture),
            "Multi-Arch" => Some(FieldName::MultiArch),
            "Source" => Some(FieldName::Source),
            "Version" => Some(FieldName::Version),
            "Depends" => Some(FieldName::Depends),
            "Description" => Some(FieldName::Description),
            "Homepage" => Some(FieldName::Homepage),
            "Original-Maintainer" => Some(FieldName::OriginalMaintainer),
            "Replaces" => Some(FieldName::Replaces),
            "Breaks" => Some(FieldName::Breaks),
            "Enhances" => Some(FieldName::Enhances),
            "Provides" => Some(FieldName::Provides),
            "Conflicts" => Some(FieldName::Conflicts),
            "Recommends" => Some(FieldName::Recommends),
            "Conffiles" => Some(FieldName::Conffiles),
            "Suggests" => Some(FieldName::Suggests),
            "Pre-Depends" => Some(FieldName::PreDepends),
            "Essential" => Some(FieldName::Essential),
            "Built-Using" => Some(FieldName::BuiltUsing),
            "Origin" => Some(FieldName::Origin),
            "Bugs" => Some(FieldName::Bugs),
            _ => None,
        }
    }

    /// Look up a field by its canonical lower-camel id.
    pub fn from_id(id: &str) -> Option<FieldName> {
        FieldName::ALL.iter().copied().find(|name| name.id() == id)
    }

    /// The `Header-Case` name as it appears in the status file.
    pub fn header(&self) -> &'static str {
        match self {
            FieldName::Package => "Package",
            FieldName::Status => "Status",
            FieldName::Priority => "Priority",
            FieldName::Section => "Section",
            FieldName::InstalledSize => "Installed-Size",
            FieldName::Maintainer => "Maintainer",
            FieldName::Architecture => "Architecture",
            FieldName::MultiArch => "Multi-Arch",
            FieldName::Source => "Source",
            FieldName::Version => "Version",
            FieldName::Depends => "Depends",
            FieldName::Description => "Description",
            FieldName::Homepage => "Homepage",
            FieldName::OriginalMaintainer => "Original-Maintainer",
            FieldName::Replaces => "Replaces",
            FieldName::Breaks => "Breaks",
            FieldName::Enhances => "Enhances",
            FieldName::Provides => "Provides",
            FieldName::Conflicts => "Conflicts",
            FieldName::Recommends => "Recommends",
            FieldName::Conffiles => "Conffiles",
            FieldName::Suggests => "Suggests",
            FieldName::PreDepends => "Pre-Depends",
            FieldName::Essential => "Essential",
            FieldName::BuiltUsing => "Built-Using",
            FieldName::Origin => "Origin",
            FieldName::Bugs => "Bugs",
        }
    }

    /// The canonical lower-camel id used by the query API.
    pub fn id(&self) -> &'static str {
        match self {
            FieldName::Package => "package",
            FieldName::Status => "status",
            FieldName::Priority => "priority",
            FieldName::Section => "section",
            FieldName::InstalledSize => "installedSize",
            FieldName::Maintainer => "maintainer",
            FieldName::Architecture => "architecture",
            FieldName::MultiArch => "multiArch",
            FieldName::Source => "source",
            FieldName::Version => "version",
            FieldName::Depends => "depends",
            FieldName::Description => "description",
            FieldName::Homepage => "homepage",
            FieldName::OriginalMaintainer => "originalMaintainer",
            FieldName::Replaces => "replaces",
            FieldName::Breaks => "breaks",
            FieldName::Enhances => "enhances",
            FieldName::Provides => "provides",
            FieldName::Conflicts => "conflicts",
            FieldName::Recommends => "recommends",
            FieldName::Conffiles => "conffiles",
            FieldName::Suggests => "suggests",
            FieldName::PreDepends => "preDepends",
            FieldName::Essential => "essential",
            FieldName::BuiltUsing => "builtUsing",
            FieldName::Origin => "origin",
            FieldName::Bugs => "bugs",
        }
    }

    /// The decode rule for this field's value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldName::Depends
            | FieldName::PreDepends
            | FieldName::Recommends
            | FieldName::Suggests
            | FieldName::Conflicts
            | FieldName::Breaks
            | FieldName::Replaces
            | FieldName::Provides
            | FieldName::BuiltUsing => FieldKind::PackageVersions,
            FieldName::Enhances => FieldKind::List,
            FieldName::Maintainer | FieldName::OriginalMaintainer => FieldKind::Emails,
            FieldName::Description => FieldKind::Description,
            FieldName::Conffiles => FieldKind::Conffiles,
            _ => FieldKind::Scalar,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
