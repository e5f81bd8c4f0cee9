//! Reference catalog describing each fastener kind: what it is, where it is
//! used, and an example export invocation.

use serde::Serialize;

use crate::params::FastenerKind;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub kind: FastenerKind,
    pub name: &'static str,
    pub description: &'static str,
    pub applications: &'static [&'static str],
    pub materials: &'static [&'static str],
    /// Specification snapshot as (label, value) rows.
    pub specs: &'static [(&'static str, &'static str)],
    /// Export flags that produce a representative part.
    pub example_args: &'static str,
}

static CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        kind: FastenerKind::HexBolt,
        name: "Hex Bolt",
        description: "A six-sided headed bolt used with a nut or tapped hole. Ideal for machine \
                      assemblies, tooling, and structural connections where high clamping force \
                      is required.",
        applications: &["Heavy equipment", "Machine frames", "Tooling plates"],
        materials: &["Alloy steel", "Stainless steel", "Zinc-plated steel"],
        specs: &[
            ("Thread", "Metric coarse M6–M24 or UNC 1/4\"–1\""),
            ("Head", "Hex external drive"),
            ("Standard", "ISO 4014 / ASME B18.2.1"),
            ("Finish", "Plain, zinc, or black oxide"),
        ],
        example_args: "--fastener hex_bolt --diameter 12 --length 45",
    },
    CatalogEntry {
        kind: FastenerKind::SocketCap,
        name: "Socket Head Cap Screw",
        description: "A cylindrical head fastener with an internal hex drive. Provides high \
                      tensile strength and the ability to be installed in tight spaces with an \
                      Allen key.",
        applications: &[
            "Robotics and automation assemblies",
            "Fixtures and modular tooling",
            "Precision mechanical assemblies",
        ],
        materials: &["Alloy steel (12.9)", "Stainless steel", "Titanium"],
        specs: &[
            ("Thread", "Metric M3–M20 or UNC #4–3/4\""),
            ("Head", "Cylindrical, internal hex"),
            ("Standard", "ISO 4762 / ASME B18.3"),
            ("Finish", "Plain, black oxide, passivated"),
        ],
        example_args: "--fastener socket_cap --diameter 8 --length 30",
    },
    CatalogEntry {
        kind: FastenerKind::HexNut,
        name: "Hex Nut",
        description: "A hexagonal nut that pairs with bolts or threaded rods. Commonly used to \
                      clamp assemblies together and often combined with washers to distribute \
                      load.",
        applications: &["General fabrication", "Structural frames", "Maintenance"],
        materials: &["Low-carbon steel", "Stainless steel", "Nylon insert variants"],
        specs: &[
            ("Thread", "Metric M6–M30 or UNC 1/4\"–1-1/4\""),
            ("Height", "0.8× to 1× nominal thread size"),
            ("Standard", "ISO 4032 / ASME B18.2.2"),
            ("Finish", "Plain, zinc, galvanized"),
        ],
        example_args: "--fastener hex_nut --diameter 16",
    },
    CatalogEntry {
        kind: FastenerKind::FlatWasher,
        name: "Flat Washer",
        description: "A thin, flat disk with a central hole placed under bolt or screw heads. \
                      Distributes clamping load, prevents surface damage, and covers oversized \
                      holes.",
        applications: &["Sheet metal work", "Wood assemblies", "Maintenance repair"],
        materials: &["Mild steel", "Stainless steel", "Nylon"],
        specs: &[
            ("Standard", "ISO 7089 / ASME B18.21.1"),
            ("Type", "Type A wide pattern"),
            ("Thickness", "1.6 mm – 3.0 mm typical"),
            ("Finish", "Plain, zinc-plated, black oxide"),
        ],
        example_args: "--fastener flat_washer --diameter 12 --outer 24",
    },
    CatalogEntry {
        kind: FastenerKind::BlindRivet,
        name: "Blind Rivet",
        description: "A permanent mechanical fastener installed from one side. Pulling the \
                      mandrel expands the rivet body, clamping sheets or components together.",
        applications: &[
            "Sheet metal enclosures",
            "Aerospace skins",
            "Appliance fabrication",
        ],
        materials: &["Aluminum", "Steel", "Monel"],
        specs: &[
            ("Body", "Open end, dome head"),
            ("Grip range", "1.6 mm – 6.4 mm"),
            ("Standard", "ISO 15979 / IFI 114"),
            ("Tooling", "Compatible with standard blind rivet pullers"),
        ],
        example_args: "--fastener blind_rivet --diameter 4.8 --grip 6.0",
    },
];

/// All catalog entries, one per fastener kind.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

impl FastenerKind {
    pub fn catalog_entry(&self) -> &'static CatalogEntry {
        // CATALOG holds exactly one entry per kind, in declaration order.
        &CATALOG[*self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_entry() {
        for kind in FastenerKind::ALL {
            assert_eq!(kind.catalog_entry().kind, kind);
        }
        assert_eq!(catalog().len(), FastenerKind::ALL.len());
    }

    #[test]
    fn example_args_name_the_entry_kind() {
        for entry in catalog() {
            let flag = format!("--fastener {}", entry.kind.name());
            assert!(entry.example_args.contains(&flag), "{}", entry.name);
        }
    }
}
