use shared::{Trend, TrendDirection};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub subtitle: Option<AttrValue>,
    #[prop_or_default]
    pub trend: Option<Trend>,
    /// Set when a rising number is bad news, e.g. incidents.
    #[prop_or_default]
    pub inverse_trend: bool,
    #[prop_or_default]
    pub icon: AttrValue,
}

fn trend_arrow(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "▲",
        TrendDirection::Down => "▼",
        TrendDirection::Stable => "■",
    }
}

fn trend_class(direction: TrendDirection, inverse: bool) -> &'static str {
    match (direction, inverse) {
        (TrendDirection::Stable, _) => "trend trend-neutral",
        (TrendDirection::Up, false) | (TrendDirection::Down, true) => "trend trend-good",
        (TrendDirection::Up, true) | (TrendDirection::Down, false) => "trend trend-bad",
    }
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-card">
            <div class="stat-card-header">
                <span class="stat-icon">{props.icon.clone()}</span>
                <h4 class="stat-title">{props.title.clone()}</h4>
            </div>
            <div class="stat-value">{props.value.clone()}</div>
            {if let Some(trend) = props.trend {
                html! {
                    <div class={trend_class(trend.direction, props.inverse_trend)}>
                        {format!("{} {}% vs last week", trend_arrow(trend.direction), trend.percentage)}
                    </div>
                }
            } else {
                html! {}
            }}
            {if let Some(subtitle) = &props.subtitle {
                html! { <div class="stat-subtitle">{subtitle.clone()}</div> }
            } else {
                html! {}
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_class_respects_inverse() {
        assert_eq!(trend_class(TrendDirection::Up, false), "trend trend-good");
        assert_eq!(trend_class(TrendDirection::Up, true), "trend trend-bad");
        assert_eq!(trend_class(TrendDirection::Down, true), "trend trend-good");
        assert_eq!(trend_class(TrendDirection::Stable, true), "trend trend-neutral");
    }

    #[test]
    fn test_trend_arrow() {
        assert_eq!(trend_arrow(TrendDirection::Down), "▼");
    }
}
