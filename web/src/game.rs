use gloo::timers::callback::Interval;
use hintsweeper_core as game;
use game::{
    BasicSolver, Button, CellView as BoardCell, Coord, Difficulty, Frontend, GameResult, HoverTarget,
    PlayEngine, PointerEvent,
};
use web_sys::HtmlSelectElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::tip::TipView;

fn js_random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

/// Drives the game timer with a one-second [`Interval`]; dropping the handle
/// cancels it.
pub(crate) struct IntervalClock {
    link: Scope<GameView>,
}

impl game::Clock for IntervalClock {
    type Handle = Interval;

    fn start_interval(&mut self) -> Interval {
        let link = self.link.clone();
        Interval::new(1_000, move || link.send_message(Msg::Tick))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer(PointerEvent),
    Tick,
    NewGame,
    SelectDifficulty(Difficulty),
    Help,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: Coord,
    y: Coord,
    class: Classes,
    #[prop_or_default]
    label: Option<String>,
    callback: Callback<PointerEvent>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        x,
        y,
        class,
        label,
        callback,
    } = props.clone();

    let button_event = |up: bool| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(button) = Button::from_dom(e.button()) else {
                return;
            };
            let ctrl = e.ctrl_key();
            log::trace!("({}, {}) mouse {} ({:?})", x, y, if up { "up" } else { "down" }, button);
            callback.emit(if up {
                PointerEvent::Up { button, ctrl }
            } else {
                PointerEvent::Down { button, ctrl }
            });
        })
    };
    let onmousedown = button_event(false);
    let onmouseup = button_event(true);

    let onmouseenter = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(PointerEvent::Hover((x, y))))
    };

    let onmouseleave = Callback::from(move |_: MouseEvent| {
        callback.emit(PointerEvent::HoverExit(HoverTarget::Cell((x, y))))
    });

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}>{for label}</td>
    }
}

/// The middle button would start autoscroll over the board.
fn blocks_default(button: i16) -> bool {
    Button::from_dom(button) == Some(Button::Middle)
}

fn cell_classes(cell: &BoardCell) -> Classes {
    cell.classes().into_iter().collect()
}

fn result_class(result: Option<GameResult>) -> &'static str {
    match result {
        None => "in-progress",
        Some(GameResult::Win) => "win",
        Some(GameResult::Lose) => "lose",
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    pub solver: bool,
}

pub(crate) struct GameView {
    frontend: Frontend<PlayEngine, BasicSolver, IntervalClock>,
    difficulty: Difficulty,
}

impl GameView {
    fn report(result: game::Result<()>) {
        if let Err(err) = result {
            log::error!("{}", err);
        }
    }

    fn view_header(&self, ctx: &Context<Self>) -> Html {
        let header = self.frontend.header();
        let mines_left = header.mines.display();
        let elapsed_time = header.timer.display();
        let class = classes!(result_class(header.result));

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });
        let cb_difficulty = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Difficulty::from_name(&select.value()).map(Msg::SelectDifficulty)
        });

        html! {
            <nav>
                <aside class="mine-counter">{mines_left}</aside>
                <span><button {class} onclick={cb_new_game}/></span>
                <aside class="timer">{elapsed_time}</aside>
                <select onchange={cb_difficulty}>
                    {
                        for Difficulty::ALL.into_iter().map(|difficulty| html! {
                            <option value={difficulty.name()} selected={difficulty == self.difficulty}>
                                {difficulty.name()}
                            </option>
                        })
                    }
                </select>
            </nav>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let callback = ctx.link().callback(Msg::Pointer);
        let onmouseleave = ctx
            .link()
            .callback(|_: MouseEvent| Msg::Pointer(PointerEvent::HoverExit(HoverTarget::Board)));
        let onmousedown = Callback::from(|e: MouseEvent| {
            if blocks_default(e.button()) {
                e.prevent_default();
            }
        });
        let onwheel = Callback::from(|e: WheelEvent| e.prevent_default());

        html! {
            <table class="board" {onmouseleave} {onmousedown} {onwheel}>
                {
                    for self.frontend.board().rows().map(|row| html! {
                        <tr>
                            {
                                for row.map(|((x, y), cell)| html! {
                                    <CellView
                                        {x}
                                        {y}
                                        class={cell_classes(cell)}
                                        label={cell.label().map(str::to_owned)}
                                        callback={callback.clone()}
                                    />
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_help(&self, ctx: &Context<Self>) -> Html {
        if !self.frontend.has_solver() {
            return html! {};
        }

        let cb_help = ctx.link().callback(|_: MouseEvent| Msg::Help);
        html! {
            <section class="solver">
                <button onclick={cb_help}>{"Help"}</button>
                if let Some(advisory) = self.frontend.advisory() {
                    <p class="advisory">{advisory}</p>
                }
                if let Some(tip) = self.frontend.tip() {
                    <TipView tip={tip.clone()}/>
                }
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let clock = IntervalClock {
            link: ctx.link().clone(),
        };
        let solver = props.solver.then(BasicSolver::default);
        let config = props.difficulty.config();
        Self {
            frontend: Frontend::new(PlayEngine::new(config, seed), solver, clock, config),
            difficulty: props.difficulty,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Pointer(event) => {
                Self::report(self.frontend.pointer(event));
                true
            }
            Tick => self.frontend.tick(),
            NewGame => {
                self.frontend.new_game(self.difficulty.config());
                true
            }
            SelectDifficulty(difficulty) => {
                if difficulty == self.difficulty {
                    return false;
                }
                self.difficulty = difficulty;
                self.frontend.new_game(difficulty.config());
                true
            }
            Help => {
                Self::report(self.frontend.help());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="hintsweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                {self.view_header(ctx)}
                {self.view_board(ctx)}
                {self.view_help(ctx)}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_button_reflects_result() {
        assert_eq!(result_class(None), "in-progress");
        assert_eq!(result_class(Some(GameResult::Win)), "win");
        assert_eq!(result_class(Some(GameResult::Lose)), "lose");
    }

    #[test]
    fn only_the_middle_button_is_blocked() {
        assert!(blocks_default(1));
        assert!(!blocks_default(0));
        assert!(!blocks_default(2));
        assert!(!blocks_default(3));
    }

    #[test]
    fn cell_labels_render_inside_the_cell() {
        let html = html! {
            <CellView x={0} y={0} class={classes!("cell-btn")} label={Some("1".to_owned())} callback={Callback::noop()}/>
        };
        assert!(matches!(html, yew::virtual_dom::VNode::VComp(_)));
    }

    #[test]
    fn cell_classes_follow_the_cell() {
        let mut cell = BoardCell::default();
        cell.set_flagged(true);
        assert_eq!(cell_classes(&cell), classes!("cell-btn", "flag"));
    }
}
