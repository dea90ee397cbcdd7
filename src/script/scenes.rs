use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::CatenaResult;
use crate::geometry::arc::curved_arrow;
use crate::geometry::arrow_tip::ArrowTip;
use crate::geometry::radial::RadialBondLayout;
use crate::geometry::zigzag::ZigZagChainBuilder;
use crate::script::config::SceneConfig;
use crate::script::dsl::{ScriptBuilder, dot, line, markup, path, polygon, text};
use crate::script::model::{Animation, Edge, Placement, Script};

const BOND_STROKE: f64 = 4.0;

/// Built-in scenes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Module title card.
    TitleCard,
    /// Carbon compounds: definition, catenation chain and bonding diagram.
    CarbonCompounds,
    /// Curved mechanism arrow with a tangent-aligned half head.
    TangentArrow,
}

impl SceneKind {
    /// All built-in scenes, in presentation order.
    pub const ALL: [SceneKind; 3] = [
        SceneKind::TitleCard,
        SceneKind::CarbonCompounds,
        SceneKind::TangentArrow,
    ];

    /// Stable scene name (also the script name).
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::TitleCard => "title_card",
            SceneKind::CarbonCompounds => "carbon_compounds",
            SceneKind::TangentArrow => "tangent_arrow",
        }
    }
}

/// Validate `cfg` and build the script for `kind`.
#[tracing::instrument(skip(cfg))]
pub fn build_scene(kind: SceneKind, cfg: &SceneConfig) -> CatenaResult<Script> {
    cfg.validate()?;
    match kind {
        SceneKind::TitleCard => title_card(cfg),
        SceneKind::CarbonCompounds => carbon_compounds(cfg),
        SceneKind::TangentArrow => tangent_arrow(cfg),
    }
}

fn fade_in(target: &str) -> Animation {
    Animation::FadeIn {
        target: target.to_owned(),
    }
}

fn fade_out(target: impl Into<String>) -> Animation {
    Animation::FadeOut {
        target: target.into(),
    }
}

fn write(target: impl Into<String>) -> Animation {
    Animation::Write {
        target: target.into(),
    }
}

fn create(target: impl Into<String>) -> Animation {
    Animation::Create {
        target: target.into(),
    }
}

fn transform(target: &str, into: &str) -> Animation {
    Animation::Transform {
        target: target.to_owned(),
        into: into.to_owned(),
    }
}

/// Title card: fade the module title in, hold, fade out.
pub fn title_card(cfg: &SceneConfig) -> CatenaResult<Script> {
    let title = "MODULE - 1 - ORGANIC CHEMISTRY - SOME BASIC CONCEPTS";
    ScriptBuilder::new(SceneKind::TitleCard.name())
        .background(cfg.palette.background)
        .shape(
            "title",
            text(title, 48.0, cfg.palette.text, Placement::At(Point::ORIGIN)),
        )?
        .play([fade_in("title")], 1.0)
        .wait(2.0)
        .play([fade_out("title")], 1.0)
        .build()
}

/// Carbon compounds: a big "C" shrinks to an atom, a zig-zag chain grows from it
/// (catenation), then a central carbon is bonded to H, O, N, S and halogens.
pub fn carbon_compounds(cfg: &SceneConfig) -> CatenaResult<Script> {
    let pal = &cfg.palette;
    let top = Placement::ToEdge(Edge::Up);

    let mut b = ScriptBuilder::new(SceneKind::CarbonCompounds.name())
        .background(pal.background)
        .shape(
            "heading",
            markup(
                "<b>Organic chemistry is the\nchemistry of carbon compounds.</b>",
                36.0,
                pal.text,
                top.clone(),
            ),
        )?
        .shape(
            "heading_catenation",
            markup(
                "<b>Carbon atoms have a tendency to form bonds between\ntheir own atoms to form long chains</b>",
                32.0,
                pal.text,
                top.clone(),
            ),
        )?
        .shape(
            "heading_bonding",
            markup(
                "<b>Carbon atoms can form strong covalent bonds\nwith H, O, N, S and halogens.</b>",
                30.0,
                pal.text,
                top,
            ),
        )?
        .shape(
            "big_c",
            text("C", 96.0, pal.atom, Placement::At(Point::new(0.0, 2.0))),
        )?
        .shape("carbon", dot(Point::ORIGIN, 0.08, pal.atom))?
        .shape(
            "catenation",
            markup(
                "<i>This property is called <b>catenation</b></i>",
                28.0,
                pal.text,
                Placement::NextTo {
                    anchor: "heading".to_owned(),
                    direction: Edge::Down,
                    buff: 1.0,
                },
            ),
        )?;

    // Definition: the symbol shrinks into an atom.
    b = b
        .play([write("heading")], 1.0)
        .play([fade_in("big_c")], 1.0)
        .play(
            [Animation::MoveTo {
                target: "big_c".to_owned(),
                to: Point::ORIGIN,
                scale: Some(0.08),
            }],
            1.0,
        )
        .play([transform("big_c", "carbon")], 1.0)
        .remove(["big_c"])
        .add(["carbon"])
        .wait(0.5)
        .play([transform("heading", "heading_catenation")], 1.0);

    // Catenation: the atom parks on the chain start and a tracer draws each bond.
    let chain = ZigZagChainBuilder::new(cfg.chain.segment_length, cfg.chain.atom_count)
        .half_angle(cfg.chain.half_angle_deg.to_radians())
        .build();
    b = b
        .play(
            [Animation::MoveTo {
                target: "carbon".to_owned(),
                to: chain.first(),
                scale: None,
            }],
            1.0,
        )
        .shape("tracer", dot(chain.first(), 0.07, pal.atom))?
        .add(["tracer"]);

    let mut chain_keys = Vec::new();
    for (i, bond) in chain.bonds().enumerate() {
        let bond_key = format!("chain_bond_{i}");
        let atom_key = format!("chain_atom_{}", i + 1);
        b = b
            .shape(&bond_key, line(bond.p0, bond.p1, BOND_STROKE, pal.bond))?
            .shape(&atom_key, dot(bond.p1, 0.06, pal.atom))?
            .play(
                [
                    create(&bond_key),
                    Animation::MoveAlongPath {
                        target: "tracer".to_owned(),
                        path: bond_key.clone(),
                    },
                    create(&atom_key),
                ],
                0.6,
            );
        chain_keys.push(bond_key);
        chain_keys.push(atom_key);
    }

    b = b
        .remove(["tracer"])
        .play([fade_in("catenation")], 1.0)
        .wait(2.0)
        .play(
            chain_keys
                .into_iter()
                .chain(["carbon".to_owned(), "catenation".to_owned()])
                .map(fade_out),
            1.0,
        )
        .play([transform("heading", "heading_bonding")], 1.0);

    // Bonding: equally spaced bonds from a central carbon, first one straight up.
    let center = cfg.bonds.center;
    b = b
        .shape(
            "center_c",
            text("C", 64.0, pal.atom, Placement::At(center)),
        )?
        .add(["center_c"])
        .play([fade_in("center_c")], 1.0);

    let layout = RadialBondLayout {
        center,
        radius: cfg.bonds.radius,
        start_angle: cfg.bonds.start_angle_deg.to_radians(),
        label_offset: cfg.bonds.label_offset,
    };
    let bonds = layout.layout(cfg.bonds.labels.len());
    for (i, (bond, label)) in bonds.iter().zip(&cfg.bonds.labels).enumerate() {
        let bond_key = format!("bond_{i}");
        let label_key = format!("bond_label_{i}");
        b = b
            .shape(&bond_key, line(center, bond.end, BOND_STROKE, pal.bond))?
            .shape(
                &label_key,
                text(
                    label.as_str(),
                    28.0,
                    pal.text,
                    Placement::At(bond.label_anchor),
                ),
            )?
            .play([create(bond_key), write(label_key)], 0.5);
    }

    b.wait(2.0).build()
}

/// Curved arrow whose built-in tip is replaced by a half head aligned to the end tangent.
pub fn tangent_arrow(cfg: &SceneConfig) -> CatenaResult<Script> {
    let a = &cfg.arrow;
    let end = a.start + Vec2::new(a.span, 0.0);
    let arc = curved_arrow(a.start, end, a.radius)?;
    let tip = ArrowTip::for_path(&arc, a.tip_size)?;
    tracing::debug!(angle = tip.angle, "arrow tip aligned");

    ScriptBuilder::new(SceneKind::TangentArrow.name())
        .background(cfg.palette.background)
        .shape("tail", dot(a.start, 0.08, cfg.palette.text))?
        .shape("arrow", path(&arc, BOND_STROKE, cfg.palette.bond))?
        .shape("tip", polygon(tip.vertices(), cfg.palette.bond))?
        .add(["tail", "arrow", "tip"])
        .wait(1.0)
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/script/scenes.rs"]
mod tests;
