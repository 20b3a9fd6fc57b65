use hintsweeper_core::{Pane, PatternPane, Tip, TipCell, TipKind};
use yew::prelude::*;

fn tip_label(cell: &TipCell) -> Option<String> {
    match cell.kind {
        TipKind::Revealed(count) if count > 0 => Some(count.to_string()),
        _ => None,
    }
}

fn tip_cell(cell: &TipCell) -> Html {
    let class: Classes = cell.classes().into_iter().collect();
    let label = tip_label(cell);
    html! { <td {class}>{for label}</td> }
}

fn rule_heading(rule_number: i32) -> String {
    format!("Rule #{}:", rule_number)
}

fn pane(pane: &Pane) -> Html {
    html! {
        <figure class="tip-pane">
            <figcaption>{pane.title}</figcaption>
            <table>
                {
                    for pane.cells.iter().map(|row| html! {
                        <tr>{ for row.iter().map(tip_cell) }</tr>
                    })
                }
            </table>
        </figure>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct TipProps {
    pub tip: Tip,
}

#[function_component(TipView)]
pub(crate) fn tip_view(props: &TipProps) -> Html {
    let Tip {
        board,
        pattern,
        moves,
    } = &props.tip;

    let pattern = match pattern {
        PatternPane::Grid { rule_number, pane: grid } => html! {
            <>
                <p class="rule-number">{rule_heading(*rule_number)}</p>
                {pane(grid)}
            </>
        },
        PatternPane::Description {
            rule_number,
            description,
            directive,
        } => html! {
            <figure class="tip-pane">
                <figcaption>{hintsweeper_core::PATTERN_PANE_TITLE}</figcaption>
                <p class="rule-number">{rule_heading(*rule_number)}</p>
                <p>{*description}</p>
                <p>{*directive}</p>
            </figure>
        },
    };

    html! {
        <div class="tip">
            {pane(board)}
            {pattern}
            {pane(moves)}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::virtual_dom::VNode;

    #[test]
    fn rule_heading_is_numbered() {
        assert_eq!(rule_heading(2), "Rule #2:");
        assert_eq!(rule_heading(3), "Rule #3:");
    }

    #[test]
    fn only_nonzero_counts_are_labelled() {
        assert_eq!(tip_label(&TipCell::new(TipKind::Revealed(3))).as_deref(), Some("3"));
        assert_eq!(tip_label(&TipCell::new(TipKind::Revealed(0))), None);
        assert_eq!(tip_label(&TipCell::new(TipKind::Unknown)), None);
    }

    #[test]
    fn tip_cells_render_as_table_cells() {
        for kind in [TipKind::Revealed(2), TipKind::Unknown, TipKind::Dead] {
            let html = tip_cell(&TipCell::new(kind));
            assert!(matches!(&html, VNode::VTag(tag) if tag.tag() == "td"));
        }
    }
}
