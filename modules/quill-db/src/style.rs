use crate::event::OperationKind;

/// Terminal colors used by the query logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Default,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    White,
    BrightWhite,
    BrightBlack,
}

/// Background/foreground pair for one label. Plain data; escape codes are
/// only produced by [`LabelStyle::paint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    pub background: Color,
    pub foreground: Color,
}

/// Style of the error suffix.
pub const ERROR_STYLE: LabelStyle = LabelStyle {
    background: Color::Red,
    foreground: Color::Default,
};

pub fn style_for(kind: OperationKind) -> LabelStyle {
    let (background, foreground) = match kind {
        OperationKind::Select => (Color::Green, Color::BrightWhite),
        OperationKind::Insert => (Color::Blue, Color::BrightWhite),
        OperationKind::Update => (Color::Yellow, Color::BrightBlack),
        OperationKind::Delete => (Color::Magenta, Color::BrightWhite),
        OperationKind::Other => (Color::White, Color::BrightBlack),
    };
    LabelStyle {
        background,
        foreground,
    }
}

impl LabelStyle {
    pub fn to_console(self) -> console::Style {
        let style = match self.background {
            Color::Default => console::Style::new(),
            Color::Red => console::Style::new().on_red(),
            Color::Green => console::Style::new().on_green(),
            Color::Yellow => console::Style::new().on_yellow(),
            Color::Blue => console::Style::new().on_blue(),
            Color::Magenta => console::Style::new().on_magenta(),
            Color::White => console::Style::new().on_white(),
            Color::BrightWhite => console::Style::new().on_white().on_bright(),
            Color::BrightBlack => console::Style::new().on_black().on_bright(),
        };
        match self.foreground {
            Color::Default => style,
            Color::Red => style.red(),
            Color::Green => style.green(),
            Color::Yellow => style.yellow(),
            Color::Blue => style.blue(),
            Color::Magenta => style.magenta(),
            Color::White => style.white(),
            Color::BrightWhite => style.white().bright(),
            Color::BrightBlack => style.black().bright(),
        }
    }

    /// Wrap `text` in escape codes, or return it as is when `colors` is off.
    pub fn paint(self, text: &str, colors: bool) -> String {
        if !colors {
            return text.to_string();
        }
        self.to_console()
            .force_styling(true)
            .apply_to(text)
            .to_string()
    }
}
