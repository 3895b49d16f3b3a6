//! Rewrite styles offered once a summary exists.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    #[value(name = "eli5")]
    Eli5,
    #[value(name = "detailed")]
    MoreDetailed,
    #[value(name = "playful")]
    Playful,
    #[value(name = "slides")]
    SlideOutline,
}

impl Style {
    /// Every style, in the order the buttons are shown
    pub const ALL: [Style; 4] = [
        Style::Eli5,
        Style::MoreDetailed,
        Style::Playful,
        Style::SlideOutline,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Style::Eli5 => "Explain Like I'm 5",
            Style::MoreDetailed => "More Detailed",
            Style::Playful => "Playful",
            Style::SlideOutline => "5-Slide Presentation Outline",
        }
    }

    /// Instruction prepended to the summary in the rewrite prompt
    pub fn instruction(self) -> &'static str {
        match self {
            Style::Eli5 => "Explain this summary like I'm 5 years old",
            Style::MoreDetailed => "Make this summary more detailed",
            Style::Playful => "Rewrite this summary in a playful tone",
            Style::SlideOutline => "Turn this summary into a 5-slide presentation outline",
        }
    }

    /// Style bound to the 1-based button number
    pub fn from_index(n: usize) -> Option<Style> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
