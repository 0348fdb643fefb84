pub const APP_TITLE: &str = "Teacher's Resource Builder";
pub const APP_TAGLINE: &str = "Instantly create lesson plans, worksheets, and more with the power of AI.";

pub const SUBJECT_PLACEHOLDER: &str = "e.g., Grade 9 Chemistry";
pub const DESCRIPTION_PLACEHOLDER: &str = "e.g., A lesson plan on cellular respiration...";
pub const DESCRIPTION_HINT: &str = "Be as descriptive as possible. Include the topic, grade level, \
and type of resource (e.g., \"a worksheet on the water cycle with 10 fill-in-the-blank questions\").";

pub const PANEL_WIDTH: usize = 48;

/// Relative widths (in eighths) of the loading skeleton's bars.
pub const SKELETON_BARS: [usize; 7] = [6, 8, 7, 4, 2, 6, 6];

pub const HELP_TEXT: &str = "\
Commands:
  subject <text>        set the subject
  description <text>    set the description (use \\n for line breaks)
  generate              generate the resource
  copy | email | print | share
  help                  show this help
  quit                  exit";
