use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::Bucket;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

const CANVAS_WIDTH: u32 = 720;
const CANVAS_HEIGHT: u32 = 280;

#[derive(Properties, PartialEq)]
pub struct BucketChartProps {
    pub title: AttrValue,
    pub buckets: Vec<Bucket>,
    pub loading: bool,
    /// Bar colour as `(r, g, b)`.
    #[prop_or((37, 99, 235))]
    pub color: (u8, u8, u8),
}

pub enum Msg {
    Draw,
}

/// Bar chart of per-period counts.
pub struct BucketChart {
    canvas_ref: NodeRef,
}

/// Upper bound of the y axis; never zero so empty series still draw an axis.
fn y_ceiling(buckets: &[Bucket]) -> f64 {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    (max as f64 * 1.15).ceil().max(1.0)
}

/// Label for the bar at axis position `x`, blank between bars.
fn label_at(buckets: &[Bucket], x: f64) -> String {
    if x < 0.0 || x.fract().abs() > f64::EPSILON {
        return String::new();
    }
    buckets
        .get(x as usize)
        .map(|b| b.label.clone())
        .unwrap_or_default()
}

impl Component for BucketChart {
    type Message = Msg;
    type Properties = BucketChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Draw => {
                self.draw_chart(&ctx.props().buckets, ctx.props().color);
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().buckets != old_props.buckets {
            self.draw_chart(&ctx.props().buckets, ctx.props().color);
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().buckets.is_empty() {
            ctx.link().send_message(Msg::Draw);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let total: u64 = props.buckets.iter().map(|b| b.count).sum();

        html! {
            <div class="chart-card">
                <div class="chart-card-header">
                    <h3 class="chart-title">{props.title.clone()}</h3>
                    <span class="chart-total">{format!("{total} total")}</span>
                </div>
                {if props.buckets.is_empty() && props.loading {
                    html! {
                        <div class="chart-loading">
                            <div class="loading-spinner"></div>
                            <p>{"Loading chart data..."}</p>
                        </div>
                    }
                } else if props.buckets.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <p>{"No data for this period"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="chart-canvas"
                            width={CANVAS_WIDTH.to_string()}
                            height={CANVAS_HEIGHT.to_string()}
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

impl BucketChart {
    fn draw_chart(&self, buckets: &[Bucket], (r, g, b): (u8, u8, u8)) {
        if buckets.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let bar_color = RGBColor(r, g, b);
        let x_max = buckets.len() as f64 - 0.5;
        let y_max = y_ceiling(buckets);

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d(-0.5_f64..x_max, 0.0_f64..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        if chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(buckets.len())
            .x_label_formatter(&|x| label_at(buckets, *x))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .label_style(("sans-serif", 12, &RGBColor(75, 85, 99)))
            .axis_style(RGBColor(209, 213, 219))
            .bold_line_style(RGBColor(243, 244, 246))
            .light_line_style(RGBColor(249, 250, 251))
            .draw()
            .is_err()
        {
            return;
        }

        let bars = buckets.iter().enumerate().map(|(i, bucket)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.35, 0.0), (x + 0.35, bucket.count as f64)],
                bar_color.filled(),
            )
        });
        if chart.draw_series(bars).is_err() {
            return;
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bucket(label: &str, day: u32, count: u64) -> Bucket {
        Bucket {
            label: label.to_string(),
            start: NaiveDate::from_ymd_opt(2025, 3, day).unwrap_or_default(),
            count,
        }
    }

    #[test]
    fn test_y_ceiling_leaves_headroom() {
        assert_eq!(y_ceiling(&[]), 1.0);
        assert_eq!(y_ceiling(&[bucket("a", 3, 0)]), 1.0);
        assert_eq!(y_ceiling(&[bucket("a", 3, 10), bucket("b", 10, 4)]), 12.0);
    }

    #[test]
    fn test_label_only_on_bar_positions() {
        let buckets = vec![bucket("Wk 03 Mar", 3, 2), bucket("Wk 10 Mar", 10, 5)];
        assert_eq!(label_at(&buckets, 0.0), "Wk 03 Mar");
        assert_eq!(label_at(&buckets, 1.0), "Wk 10 Mar");
        assert_eq!(label_at(&buckets, 0.5), "");
        assert_eq!(label_at(&buckets, 2.0), "");
        assert_eq!(label_at(&buckets, -0.5), "");
    }

    #[test]
    fn test_draw_chart_without_canvas_is_noop() {
        let chart = BucketChart {
            canvas_ref: NodeRef::default(),
        };
        chart.draw_chart(&[bucket("a", 3, 1)], (0, 0, 0));
        chart.draw_chart(&[], (0, 0, 0));
    }

    #[test]
    fn test_props_default_color() {
        let props = yew::props!(BucketChartProps {
            title: "Incidents",
            buckets: Vec::<Bucket>::new(),
            loading: true,
        });
        assert_eq!(props.color, (37, 99, 235));
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_component_creation_in_wasm() {
        let chart = BucketChart {
            canvas_ref: NodeRef::default(),
        };
        chart.draw_chart(&[], (37, 99, 235));
    }
}
