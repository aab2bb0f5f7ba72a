#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub kind: &'static str,
    pub rating: f32,
    pub duration: &'static str,
    pub downloads: u32,
    pub featured: bool,
}

/// `(id, display name)`; `"all"` matches every resource.
pub const CATEGORIES: [(&str, &str); 7] = [
    ("all", "All Categories"),
    ("academic", "Academic Support"),
    ("mental-health", "Mental Health"),
    ("financial", "Financial Aid"),
    ("career", "Career Guidance"),
    ("study-skills", "Study Skills"),
    ("time-management", "Time Management"),
];

pub const KINDS: [(&str, &str); 6] = [
    ("all", "All Types"),
    ("article", "Articles"),
    ("video", "Videos"),
    ("guide", "Guides"),
    ("tool", "Tools"),
    ("course", "Courses"),
];

pub static LIBRARY: [Resource; 8] = [
    Resource {
        id: 1,
        title: "Effective Study Techniques for College Success",
        description: "Comprehensive guide covering proven study methods, note-taking strategies, and memory techniques.",
        category: "study-skills",
        kind: "guide",
        rating: 4.8,
        duration: "25 min read",
        downloads: 1247,
        featured: true,
    },
    Resource {
        id: 2,
        title: "Managing Academic Stress and Anxiety",
        description: "Learn practical strategies to cope with academic pressure and maintain mental well-being.",
        category: "mental-health",
        kind: "video",
        rating: 4.9,
        duration: "18 min",
        downloads: 892,
        featured: true,
    },
    Resource {
        id: 3,
        title: "Financial Aid Application Masterclass",
        description: "Step-by-step guide to applying for scholarships, grants, and student loans.",
        category: "financial",
        kind: "course",
        rating: 4.7,
        duration: "2 hours",
        downloads: 634,
        featured: false,
    },
    Resource {
        id: 4,
        title: "Time Management for Students",
        description: "Master the art of balancing academics, work, and personal life with proven time management techniques.",
        category: "time-management",
        kind: "article",
        rating: 4.6,
        duration: "15 min read",
        downloads: 1156,
        featured: true,
    },
    Resource {
        id: 5,
        title: "Career Planning Workbook",
        description: "Interactive workbook to help you explore career options and create a professional development plan.",
        category: "career",
        kind: "tool",
        rating: 4.8,
        duration: "45 min",
        downloads: 723,
        featured: false,
    },
    Resource {
        id: 6,
        title: "Academic Writing Excellence",
        description: "Improve your writing skills with this comprehensive guide to academic writing and research.",
        category: "academic",
        kind: "guide",
        rating: 4.5,
        duration: "30 min read",
        downloads: 945,
        featured: false,
    },
    Resource {
        id: 7,
        title: "Mindfulness and Meditation for Students",
        description: "Learn mindfulness techniques to reduce stress, improve focus, and enhance overall well-being.",
        category: "mental-health",
        kind: "video",
        rating: 4.9,
        duration: "22 min",
        downloads: 1089,
        featured: true,
    },
    Resource {
        id: 8,
        title: "Study Group Organization Tool",
        description: "Digital tool to help you organize and manage effective study groups with your peers.",
        category: "study-skills",
        kind: "tool",
        rating: 4.4,
        duration: "10 min setup",
        downloads: 567,
        featured: false,
    },
];

#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub search: String,
    pub category: Option<String>,
    pub kind: Option<String>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = resource.title.to_lowercase().contains(&needle)
            || resource.description.to_lowercase().contains(&needle);

        matches_search
            && wildcard_eq(self.category.as_deref(), resource.category)
            && wildcard_eq(self.kind.as_deref(), resource.kind)
    }
}

fn wildcard_eq(selected: Option<&str>, value: &str) -> bool {
    match selected {
        None | Some("all") => true,
        Some(selected) => selected == value,
    }
}

pub fn filter<'a>(resources: &'a [Resource], filter: &ResourceFilter) -> Vec<&'a Resource> {
    resources.iter().filter(|r| filter.matches(r)).collect()
}

pub fn featured(resources: &[Resource]) -> Vec<&Resource> {
    resources.iter().filter(|r| r.featured).collect()
}

pub fn category_name(id: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(category, _)| *category == id)
        .map(|(_, name)| *name)
}
