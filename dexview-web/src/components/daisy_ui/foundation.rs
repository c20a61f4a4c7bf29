pub use web_sys::{Event, HtmlInputElement, HtmlSelectElement, InputEvent, MouseEvent};
pub use yew::classes;
pub use yew::function_component;
pub use yew::html::TargetCast;
pub use yew::prelude::{AttrValue, Callback, Children, Classes, Html, Properties, html};

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DaisyColor {
    Neutral,
    #[default]
    Primary,
    Info,
    Success,
    Warning,
    Error,
}

impl DaisyColor {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Primary => "primary",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn class(self, prefix: &str) -> String {
        format!("{prefix}-{}", self.suffix())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DaisySize {
    Xs,
    Sm,
    Md,
    Lg,
}

impl DaisySize {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    #[must_use]
    pub fn class(self, prefix: &str) -> String {
        format!("{prefix}-{}", self.suffix())
    }
}

#[must_use]
pub fn class_list(base: &[&'static str], extra: &Classes) -> Classes {
    let mut classes = Classes::new();
    for item in base {
        classes.push(*item);
    }
    classes.push(extra.clone());
    classes
}
