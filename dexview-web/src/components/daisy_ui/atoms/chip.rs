use crate::components::daisy_ui::foundation as f;

/// What a chip stands for. Decides its colour.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ChipKind {
    /// Type, spawn context or free requirement text.
    #[default]
    Tag,
    /// An active dex filter.
    Filter,
    Preset,
    Biome,
    /// A biome that must be avoided.
    ExcludedBiome,
}

impl ChipKind {
    #[must_use]
    pub fn class(self) -> String {
        match self {
            Self::Tag => "badge-outline".to_string(),
            Self::Filter => f::DaisyColor::Warning.class("badge"),
            Self::Preset => f::DaisyColor::Primary.class("badge"),
            Self::Biome => f::DaisyColor::Info.class("badge"),
            Self::ExcludedBiome => f::DaisyColor::Error.class("badge"),
        }
    }
}

#[derive(f::Properties, PartialEq, Clone)]
pub struct ChipProps {
    pub label: f::AttrValue,
    #[prop_or_default]
    pub kind: ChipKind,
    /// Fragment the chip links to, e.g. `#/preset/natural`.
    #[prop_or_default]
    pub href: Option<f::AttrValue>,
    #[prop_or_default]
    pub title: Option<f::AttrValue>,
}

#[f::function_component(Chip)]
pub fn chip(props: &ChipProps) -> f::Html {
    let class = f::classes!("badge", props.kind.class());
    match props.href.clone() {
        Some(href) => f::html! {
            <a class={class} href={href} title={props.title.clone()}>{ props.label.clone() }</a>
        },
        None => f::html! {
            <span class={class} title={props.title.clone()}>{ props.label.clone() }</span>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(props: ChipProps) -> String {
        block_on(LocalServerRenderer::<Chip>::with_props(props).render())
    }

    #[test]
    fn linked_chips_are_anchors() {
        let preset = render(ChipProps {
            label: "natural".into(),
            kind: ChipKind::Preset,
            href: Some("#/preset/natural".into()),
            title: None,
        });
        assert!(preset.contains("<a "));
        assert!(!preset.contains("<span"));
        assert!(preset.contains(r##"href="#/preset/natural""##));
        assert!(preset.contains("badge-primary"));

        let tag = render(ChipProps {
            label: "grass".into(),
            kind: ChipKind::Tag,
            href: None,
            title: Some("type".into()),
        });
        assert!(tag.contains("<span"));
        assert!(!tag.contains("<a "));
        assert!(tag.contains("badge-outline"));
    }

    #[test]
    fn excluded_biomes_stand_out() {
        assert_eq!(ChipKind::ExcludedBiome.class(), "badge-error");
        assert_eq!(ChipKind::Biome.class(), "badge-info");
        assert_eq!(ChipKind::default(), ChipKind::Tag);
    }
}
