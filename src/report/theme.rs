use crate::canvas::{Color, StyleToken};
use crate::error::Error;
use crate::fonts::FontWeight;
use crate::model::Severity;

/// How a 0-100 overall score maps onto risk buckets. Both use the 80/60/40
/// thresholds and differ only in direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreScale {
    /// >=80 severe, >=60 elevated, >=40 moderate, below that low.
    HigherIsRiskier,
    /// >=80 low, >=60 moderate, >=40 elevated, below that severe. Matches the
    /// analysis backend, where the score is 100 minus the scaled risk.
    HigherIsSafer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBucket {
    Severe,
    Elevated,
    Moderate,
    Low,
}

impl ScoreScale {
    pub fn bucket(self, score: u8) -> ScoreBucket {
        let rank = match score {
            80.. => 3,
            60..=79 => 2,
            40..=59 => 1,
            _ => 0,
        };
        let ascending = [
            ScoreBucket::Low,
            ScoreBucket::Moderate,
            ScoreBucket::Elevated,
            ScoreBucket::Severe,
        ];
        match self {
            ScoreScale::HigherIsRiskier => ascending[rank],
            ScoreScale::HigherIsSafer => ascending[3 - rank],
        }
    }
}

impl ScoreBucket {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBucket::Severe => "Severe Risk",
            ScoreBucket::Elevated => "Elevated Risk",
            ScoreBucket::Moderate => "Moderate Risk",
            ScoreBucket::Low => "Low Risk",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreColors {
    pub severe: Color,
    pub elevated: Color,
    pub moderate: Color,
    pub low: Color,
}

impl ScoreColors {
    pub fn color(&self, bucket: ScoreBucket) -> Color {
        match bucket {
            ScoreBucket::Severe => self.severe,
            ScoreBucket::Elevated => self.elevated,
            ScoreBucket::Moderate => self.moderate,
            ScoreBucket::Low => self.low,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeverityColors {
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

impl SeverityColors {
    pub fn color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub on_primary: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub surface: Color,
    pub flagged: Color,
    pub affirmative: Color,
    pub affirmative_surface: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    pub title: f32,
    pub subtitle: f32,
    pub heading: f32,
    pub body: f32,
    pub small: f32,
    pub badge: f32,
    pub score: f32,
}

/// Every styling constant of a report. All lengths are in points.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub line_height: f32,
    pub fonts: FontSizes,
    pub palette: Palette,
    pub severity: SeverityColors,
    pub score_colors: ScoreColors,
    pub score_scale: ScoreScale,
    pub header_height: f32,
    pub section_gap: f32,
    pub block_gap: f32,
    pub row_height: f32,
    pub badge_height: f32,
    pub badge_padding: f32,
    pub corner_radius: f32,
    pub card_height: f32,
    pub affirmative_height: f32,
    pub indent: f32,
    /// Clause and requirement texts longer than this many characters are cut
    /// before wrapping.
    pub text_char_limit: usize,
}

const A4: (f32, f32) = (595.28, 841.89);

impl Theme {
    /// Layout of the original printable report: wide margins, blue banner and
    /// the score buckets read with high scores as high risk.
    pub fn classic() -> Self {
        Theme {
            name: "classic",
            page_width: A4.0,
            page_height: A4.1,
            margin: 50.0,
            line_height: 14.0,
            fonts: FontSizes {
                title: 22.0,
                subtitle: 12.0,
                heading: 14.0,
                body: 10.0,
                small: 8.0,
                badge: 8.0,
                score: 20.0,
            },
            palette: Palette {
                primary: [30, 64, 175],
                on_primary: [255, 255, 255],
                text: [31, 41, 55],
                muted: [107, 114, 128],
                border: [209, 213, 219],
                surface: [243, 244, 246],
                flagged: [185, 28, 28],
                affirmative: [21, 128, 61],
                affirmative_surface: [220, 252, 231],
            },
            severity: SeverityColors {
                low: [34, 197, 94],
                medium: [234, 179, 8],
                high: [220, 38, 38],
            },
            score_colors: ScoreColors {
                severe: [220, 38, 38],
                elevated: [249, 115, 22],
                moderate: [234, 179, 8],
                low: [34, 197, 94],
            },
            score_scale: ScoreScale::HigherIsRiskier,
            header_height: 100.0,
            section_gap: 18.0,
            block_gap: 8.0,
            row_height: 20.0,
            badge_height: 16.0,
            badge_padding: 6.0,
            corner_radius: 4.0,
            card_height: 96.0,
            affirmative_height: 36.0,
            indent: 14.0,
            text_char_limit: 300,
        }
    }

    /// Layout of the dashboard export: tighter spacing, indigo banner, high
    /// scores read as good compliance.
    pub fn dashboard() -> Self {
        Theme {
            name: "dashboard",
            page_width: A4.0,
            page_height: A4.1,
            margin: 40.0,
            line_height: 13.0,
            fonts: FontSizes {
                title: 20.0,
                subtitle: 11.0,
                heading: 13.0,
                body: 9.5,
                small: 7.5,
                badge: 7.5,
                score: 18.0,
            },
            palette: Palette {
                primary: [79, 70, 229],
                on_primary: [255, 255, 255],
                text: [17, 24, 39],
                muted: [75, 85, 99],
                border: [229, 231, 235],
                surface: [249, 250, 251],
                flagged: [220, 38, 38],
                affirmative: [5, 150, 105],
                affirmative_surface: [209, 250, 229],
            },
            severity: SeverityColors {
                low: [16, 185, 129],
                medium: [245, 158, 11],
                high: [239, 68, 68],
            },
            score_colors: ScoreColors {
                severe: [239, 68, 68],
                elevated: [249, 115, 22],
                moderate: [245, 158, 11],
                low: [16, 185, 129],
            },
            score_scale: ScoreScale::HigherIsSafer,
            header_height: 84.0,
            section_gap: 14.0,
            block_gap: 6.0,
            row_height: 18.0,
            badge_height: 15.0,
            badge_padding: 5.0,
            corner_radius: 6.0,
            card_height: 88.0,
            affirmative_height: 32.0,
            indent: 12.0,
            text_char_limit: 240,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "dashboard" => Some(Self::dashboard()),
            _ => None,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Reject geometry in which a fixed-height block could never fit a page.
    pub fn validate(&self) -> Result<(), Error> {
        let usable = self.page_height - 2.0 * self.margin;
        if self.margin <= 0.0 || self.content_width() <= 0.0 || usable <= 0.0 {
            return Err(Error::InvalidTheme(format!(
                "margin {} leaves no room on a {}x{} page",
                self.margin, self.page_width, self.page_height
            )));
        }
        if self.line_height <= 0.0 || self.fonts.body <= 0.0 {
            return Err(Error::InvalidTheme("line height and body size must be positive".into()));
        }
        if self.header_height < self.margin
            || self.header_height + self.section_gap > self.page_height - self.margin
        {
            return Err(Error::InvalidTheme(format!(
                "header height {} must lie between the margin and the bottom margin",
                self.header_height
            )));
        }
        let tallest = self
            .card_height
            .max(self.affirmative_height)
            .max(self.row_height)
            .max(self.badge_height);
        if tallest > usable {
            return Err(Error::InvalidTheme(format!(
                "block height {tallest} exceeds usable page height {usable}"
            )));
        }
        if self.text_char_limit < 4 {
            return Err(Error::InvalidTheme("text_char_limit must be at least 4".into()));
        }
        Ok(())
    }

    pub fn title(&self) -> StyleToken {
        StyleToken::new(self.palette.on_primary, self.fonts.title, FontWeight::Bold)
    }

    pub fn heading(&self) -> StyleToken {
        StyleToken::new(self.palette.primary, self.fonts.heading, FontWeight::Bold)
    }

    pub fn body(&self) -> StyleToken {
        StyleToken::new(self.palette.text, self.fonts.body, FontWeight::Normal)
    }

    pub fn muted(&self) -> StyleToken {
        StyleToken::new(self.palette.muted, self.fonts.small, FontWeight::Normal)
    }

    pub fn badge(&self) -> StyleToken {
        StyleToken::new(self.palette.on_primary, self.fonts.badge, FontWeight::Bold)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dashboard()
    }
}
