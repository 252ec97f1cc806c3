use rgb::RGB8;
use simple_xml_builder::XMLElement;

use crate::{indexed_vec::IdxType, Board, PathOpts};

/// Code to write jigsaw boards to SVG files.  Every piece becomes a `<path>` carrying its cell
/// index, position and rotation class as `data-*` attributes, so that a display layer can attach
/// click and hover handlers without knowing how the outlines were made.
pub fn gen_svg_string(board: &Board, opts: &RenderingOpts, scale: f32) -> String {
    gen_svg(board, opts, scale).to_string()
}

/// Generate the root `<svg>` element for a board
pub fn gen_svg(board: &Board, opts: &RenderingOpts, scale: f32) -> XMLElement {
    let img_dimensions = opts.path_opts.board_size(board.rows(), board.cols(), scale);

    // Root SVG element
    let mut root = XMLElement::new("svg");
    root.add_attribute("width", &img_dimensions.x.to_string());
    root.add_attribute("height", &img_dimensions.y.to_string());
    root.add_attribute("xmlns", "http://www.w3.org/2000/svg");

    let stroke_width_str = (opts.stroke_width * scale).to_string();
    for piece in board.render(&opts.path_opts, scale) {
        let mut path_elem = XMLElement::new("path");
        path_elem.add_attribute("d", &piece.path.svg_d());
        // Identity, for interaction handlers
        path_elem.add_attribute("data-index", &piece.index.to_idx().to_string());
        path_elem.add_attribute("data-row", &piece.row.to_string());
        path_elem.add_attribute("data-col", &piece.col.to_string());
        path_elem.add_attribute("data-class", &piece.class_id.to_string());
        // Style
        path_elem.add_attribute("fill", &opts.fill_color.to_string());
        path_elem.add_attribute("stroke", &opts.stroke_color.to_string());
        path_elem.add_attribute("stroke-width", &stroke_width_str);
        path_elem.add_attribute("stroke-linejoin", "round");
        root.add_child(path_elem);
    }

    root
}

/// Configuration for how a jigsaw board should be rendered
#[derive(Debug, Clone)]
pub struct RenderingOpts {
    /// Where the cells go, in unscaled units
    pub path_opts: PathOpts,
    /// What color the pieces should be filled.  Defaults to cornflower blue
    pub fill_color: RGB8,
    /// The colour of the piece outlines.  Defaults to black
    pub stroke_color: RGB8,
    /// How wide the piece outlines are, in the same units as `path_opts`
    pub stroke_width: f32,
}

impl Default for RenderingOpts {
    fn default() -> Self {
        Self {
            path_opts: PathOpts::default(),
            fill_color: RGB8::new(100, 149, 237),
            stroke_color: RGB8::new(0, 0, 0),
            stroke_width: 10.0, // 1/30th of a cell
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn one_path_per_piece() {
        let board = Board::generate(2, 3, &mut ChaCha8Rng::seed_from_u64(21));
        let svg = gen_svg_string(&board, &RenderingOpts::default(), 0.5);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"550\""));
        assert!(svg.contains("height=\"375\""));
        assert_eq!(svg.matches("<path").count(), 6);
        assert!(svg.contains("data-index=\"5\""));
        assert!(svg.contains("stroke-width=\"5\""));
    }

    #[test]
    fn empty_board_is_just_the_margin() {
        let svg = gen_svg_string(&Board::empty(), &RenderingOpts::default(), 1.0);
        assert!(svg.contains("width=\"50\""));
        assert_eq!(svg.matches("<path").count(), 0);
    }
}
