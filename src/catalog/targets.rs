use serde::Serialize;

/// A remote-viewing target revealed at the end of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTarget {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub image_source: &'static str,
}

pub static REMOTE_TARGETS: [RemoteTarget; 5] = [
    RemoteTarget {
        id: "RV-001",
        name: "Ancient Ruins",
        location: "Machu Picchu, Peru",
        description: "Terraced stone structures on a mountain ridge.",
        image_source: "https://images.unsplash.com/photo-1548013146-72479768bbaa?auto=format&fit=crop&w=800&q=80",
    },
    RemoteTarget {
        id: "RV-002",
        name: "Industrial Complex",
        location: "Steel Works",
        description: "Heavy metal structures, smoke, and linear pipes.",
        image_source: "https://images.unsplash.com/photo-1565463776629-4b6e5682855b?auto=format&fit=crop&w=800&q=80",
    },
    RemoteTarget {
        id: "RV-003",
        name: "Natural Wonder",
        location: "Mount Everest",
        description: "Jagged white peaks against a blue sky, extremely cold.",
        image_source: "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?auto=format&fit=crop&w=800&q=80",
    },
    RemoteTarget {
        id: "RV-004",
        name: "Maritime Structure",
        location: "Golden Gate Bridge",
        description: "Large red structure over blue water, foggy atmosphere.",
        image_source: "https://images.unsplash.com/photo-1449034446853-66c86144b0ad?auto=format&fit=crop&w=800&q=80",
    },
    RemoteTarget {
        id: "RV-005",
        name: "Historic Sanctuary",
        location: "Taj Mahal",
        description: "White domed structure with reflecting pools, symmetry.",
        image_source: "https://images.unsplash.com/photo-1564507592333-c60657eaa0ae?auto=format&fit=crop&w=800&q=80",
    },
];
