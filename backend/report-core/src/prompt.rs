//! System prompt construction.
//!
//! [`build_prompt`] is pure: the same readings always give the same text.

use crate::reading::{POOL_VOLUME_KEY, ReadingInput};

pub const ROLE_DESCRIPTION: &str = "You are Pool ChemGPT, a professional pool water technician.";

/// A target band the model compares each reading against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRange {
    pub parameter: &'static str,
    pub target: &'static str,
}

pub const REFERENCE_RANGES: [ReferenceRange; 7] = [
    ReferenceRange {
        parameter: "Free chlorine (FC)",
        target: "3-5 ppm",
    },
    ReferenceRange {
        parameter: "pH",
        target: "7.2-7.4",
    },
    ReferenceRange {
        parameter: "Total alkalinity (TA)",
        target: "100-150 ppm",
    },
    ReferenceRange {
        parameter: "Cyanuric acid (CYA)",
        target: "30-50 ppm",
    },
    ReferenceRange {
        parameter: "Total hardness (TH)",
        target: "200-400 ppm",
    },
    ReferenceRange {
        parameter: "Oxidation-reduction potential (ORP)",
        target: "650-750 mV",
    },
    ReferenceRange {
        parameter: "Phosphates",
        target: "below 100 ppb",
    },
];

/// Report sections, in the order the model must produce them.
pub const REPORT_SECTIONS: [&str; 4] = [
    "Analysis",
    "Chemical Adjustments",
    "Step-by-Step Treatment",
    "Maintenance",
];

fn section_brief(section: &str) -> String {
    match section {
        "Analysis" => String::from(concat!(
            "interpret every reading against its target, flag issues, ",
            "and use ORP to comment on chlorine activity",
        )),
        "Chemical Adjustments" => format!(
            "exact dosages in grams or mL, calculated from the {POOL_VOLUME_KEY} reading"
        ),
        "Step-by-Step Treatment" => String::from(
            "what to do and in what order, with safety notes for handling each chemical",
        ),
        _ => String::from("ongoing care as a short checklist"),
    }
}

/// Build the system prompt for `input`.
pub fn build_prompt(input: &ReadingInput) -> String {
    let mut lines: Vec<String> = vec![
        ROLE_DESCRIPTION.to_string(),
        String::from(
            "Assess the following pool test results and write a detailed treatment report.",
        ),
        String::new(),
        input.to_pretty_json(),
        String::new(),
        String::from("Compare each reading with these targets:"),
    ];

    lines.extend(
        REFERENCE_RANGES
            .iter()
            .map(|range| format!("- {}: {}", range.parameter, range.target)),
    );

    lines.push(String::new());
    lines.push(String::from(
        "If a reading is missing, say so plainly instead of assuming a value.",
    ));
    lines.push(String::new());
    lines.push(String::from(
        "Respond in markdown with exactly these sections, in this order:",
    ));

    lines.extend(
        REPORT_SECTIONS
            .iter()
            .enumerate()
            .map(|(index, section)| {
                format!("{}. **{}** - {}.", index + 1, section, section_brief(section))
            }),
    );

    let mut prompt = lines.join("\n");
    prompt.push('\n');
    prompt
}
