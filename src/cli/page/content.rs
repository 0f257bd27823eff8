use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub image: &'static str,
    pub bio: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub badge: &'static str,
    pub headline: &'static str,
    pub pitch: &'static str,
    pub primary_cta: NavItem,
    pub secondary_cta: NavItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub heading: &'static str,
    pub email: &'static str,
    /// Placeholders of the presentational inquiry form.
    pub form_fields: [&'static str; 3],
    pub submit_label: &'static str,
}

pub const BRAND: &str = "LUMINA";
pub const ASSISTANT_NAME: &str = "Lumina AI";
pub const ASSISTANT_STATUS: &str = "Online Assistant";
pub const CHAT_PLACEHOLDER: &str = "Type your question...";

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Home", href: "#home" },
    NavItem { label: "Services", href: "#services" },
    NavItem { label: "About", href: "#about" },
    NavItem { label: "Team", href: "#team" },
    NavItem { label: "Contact", href: "#contact" },
];

pub const GET_STARTED: NavItem = NavItem {
    label: "Get Started",
    href: "#contact",
};

pub const HERO: Hero = Hero {
    badge: "Redefining Innovation",
    headline: "Architecting the Future of Intelligence.",
    pitch: "We empower visionary companies with cutting-edge AI, robust cloud infrastructure, and custom software solutions.",
    primary_cta: NavItem {
        label: "Explore Services",
        href: "#services",
    },
    secondary_cta: NavItem {
        label: "Our Story",
        href: "#about",
    },
};

pub const SERVICES_HEADING: (&str, &str) = (
    "Core Expertise",
    "Everything you need to scale in the digital age.",
);

pub const SERVICES: [Service; 4] = [
    Service {
        id: "ai",
        title: "Generative AI Strategy",
        description: "We help enterprises integrate LLMs and custom AI solutions to automate complex workflows and boost productivity.",
        icon: "fa-brain",
        color: "bg-blue-500",
    },
    Service {
        id: "cloud",
        title: "Cloud Architecture",
        description: "Scalable, secure, and cost-effective cloud infrastructure design utilizing AWS, GCP, and Azure best practices.",
        icon: "fa-cloud",
        color: "bg-indigo-500",
    },
    Service {
        id: "custom-dev",
        title: "Custom Software",
        description: "End-to-end development of robust web and mobile applications tailored to your specific business needs.",
        icon: "fa-code",
        color: "bg-purple-500",
    },
    Service {
        id: "data-analytics",
        title: "Data Intelligence",
        description: "Turn your raw data into actionable insights with our advanced visualization and predictive modeling services.",
        icon: "fa-chart-pie",
        color: "bg-pink-500",
    },
];

pub const MISSION: (&str, &str, &str) = (
    "Our Mission",
    "Pioneering the next wave of human-AI collaboration.",
    "We focus on bridging the gap between technological potential and business reality.",
);

pub const TEAM_HEADING: &str = "The Brain Trust";

pub const TEAM: [TeamMember; 3] = [
    TeamMember {
        name: "Sarah Jenkins",
        role: "Chief Executive Officer",
        image: "https://picsum.photos/seed/sarah/400/400",
        bio: "Former VP of Tech at Google with 20+ years of experience in scaling startups.",
    },
    TeamMember {
        name: "Dr. Michael Chen",
        role: "Chief AI Architect",
        image: "https://picsum.photos/seed/michael/400/400",
        bio: "PhD in Computer Science with a focus on neural networks and deep learning.",
    },
    TeamMember {
        name: "Elena Rodriguez",
        role: "Head of Design",
        image: "https://picsum.photos/seed/elena/400/400",
        bio: "Award-winning UX designer dedicated to making complex tech intuitive.",
    },
];

pub const CONTACT: Contact = Contact {
    heading: "Let's discuss your next project.",
    email: "hello@lumina-solutions.io",
    form_fields: ["Your Name", "Email", "Message"],
    submit_label: "Send Inquiry",
};

pub const FOOTER: &str = "© 2024 Lumina Solutions International. All rights reserved.";

/// In-page anchors the navigation can jump to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    Services,
    About,
    Team,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Services,
        Section::About,
        Section::Team,
        Section::Contact,
    ];

    pub fn anchor(&self) -> &'static str {
        match self {
            Section::Home => "#home",
            Section::Services => "#services",
            Section::About => "#about",
            Section::Team => "#team",
            Section::Contact => "#contact",
        }
    }

    /// Accepts `#team`, `team` or a nav label such as `Team`.
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let name = anchor.trim().trim_start_matches('#').to_lowercase();
        Self::ALL
            .into_iter()
            .find(|section| section.anchor()[1..] == name)
    }
}
