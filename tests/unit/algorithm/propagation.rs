//! Tests for cell collapse and one-hop propagation

#[cfg(test)]
mod tests {
    use crate::fixtures::{raster, tile_of};
    use wfctile::AlgorithmError;
    use wfctile::algorithm::propagation::{ContradictionSite, collapse, propagate};
    use wfctile::algorithm::selection::RandomSelector;
    use wfctile::analysis::adjacency::AdjacencyModel;
    use wfctile::spatial::direction::Direction;
    use wfctile::spatial::grid::{CellState, OutputGrid, SuperpositionCell};
    use wfctile::spatial::tiles::TileCatalog;

    fn open_cell(keys: &str) -> SuperpositionCell {
        SuperpositionCell::from_candidates(keys.chars().map(|key| (tile_of(key, 1), 1)))
    }

    // Tests collapse leaves exactly one of the previous candidates
    // Verified by choosing outside the candidate set
    #[test]
    fn test_collapse_picks_existing_candidate() {
        let mut grid = OutputGrid::from_cells(1, 1, vec![open_cell("ABC")]).unwrap();
        let mut selector = RandomSelector::new(9);

        let chosen = collapse(&mut grid, 0, 0, &mut selector).unwrap();
        assert!([tile_of('A', 1), tile_of('B', 1), tile_of('C', 1)].contains(&chosen));
        assert_eq!(grid.cell(0, 0).unwrap().state(), CellState::Collapsed(chosen));
    }

    // Tests zero-weight candidates are never chosen
    // Verified by drawing uniformly over candidates
    #[test]
    fn test_collapse_respects_weights() {
        let (a, b) = (tile_of('A', 1), tile_of('B', 1));
        for seed in 0..32 {
            let cell = SuperpositionCell::from_candidates([(a, 0), (b, 4)]);
            let mut grid = OutputGrid::from_cells(1, 1, vec![cell]).unwrap();
            let mut selector = RandomSelector::new(seed);
            assert_eq!(collapse(&mut grid, 0, 0, &mut selector).unwrap(), b);
        }
    }

    // Tests collapsing an empty cell reports a contradiction
    // Verified by returning an arbitrary tile
    #[test]
    fn test_collapse_empty_cell() {
        let mut grid = OutputGrid::from_cells(2, 1, vec![open_cell("AB"), open_cell("")]).unwrap();
        let mut selector = RandomSelector::new(1);

        assert!(matches!(
            collapse(&mut grid, 1, 0, &mut selector),
            Err(AlgorithmError::Contradiction { x: 1, y: 0 })
        ));
        assert!(matches!(
            collapse(&mut grid, 2, 0, &mut selector),
            Err(AlgorithmError::OutOfBounds { .. })
        ));
    }

    // Tests neighbors are restricted to the chosen tile's rules with rule weights
    // Verified by propagating with the inverse direction
    #[test]
    fn test_propagate_restricts_neighbors() {
        let (catalog, map) = TileCatalog::build(&raster(&["ABB", "CAB"], 1), 1).unwrap();
        let model = AdjacencyModel::build(&map, &catalog).unwrap();
        let (a, b, c) = (tile_of('A', 1), tile_of('B', 1), tile_of('C', 1));

        let mut grid = OutputGrid::seeded(3, 3, &catalog).unwrap();
        grid.cell_mut(1, 1).unwrap().retain_only(&a);
        let sites = propagate(&mut grid, &model, 1, 1, a).unwrap();
        assert!(sites.is_empty());

        let right = grid.cell(2, 1).unwrap();
        assert_eq!(right.candidates().collect::<Vec<_>>(), vec![(b, 2)]);

        let left = grid.cell(0, 1).unwrap();
        assert_eq!(left.candidates().collect::<Vec<_>>(), vec![(c, 1)]);

        let up = grid.cell(1, 0).unwrap();
        assert_eq!(up.candidates().collect::<Vec<_>>(), vec![(b, 1)]);

        let down = grid.cell(1, 2).unwrap();
        assert_eq!(down.candidates().collect::<Vec<_>>(), vec![(c, 1)]);

        // Diagonals are untouched
        assert_eq!(grid.cell(0, 0).unwrap().len(), catalog.len());
        assert_eq!(grid.cell(2, 2).unwrap().len(), catalog.len());
    }

    // Tests propagation does not cascade past the direct neighbors
    // Verified by propagating again from a newly single-candidate neighbor
    #[test]
    fn test_propagate_is_one_hop() {
        let (catalog, map) = TileCatalog::build(&raster(&["AB"], 1), 1).unwrap();
        let model = AdjacencyModel::build(&map, &catalog).unwrap();
        let a = tile_of('A', 1);

        let mut grid = OutputGrid::seeded(3, 1, &catalog).unwrap();
        grid.cell_mut(0, 0).unwrap().retain_only(&a);
        propagate(&mut grid, &model, 0, 0, a).unwrap();

        assert_eq!(grid.cell(1, 0).unwrap().len(), 1);
        assert_eq!(grid.cell(2, 0).unwrap().len(), 2);
    }

    // Tests emptied neighbors are reported with their cause
    // Verified by reporting only the first contradiction
    #[test]
    fn test_propagate_reports_contradictions() {
        let (a, b) = (tile_of('A', 1), tile_of('B', 1));
        let model = AdjacencyModel::new();
        let cells = vec![
            open_cell("AB"),
            SuperpositionCell::from_candidates([(a, 1)]),
            open_cell("AB"),
            open_cell("AB"),
        ];
        let mut grid = OutputGrid::from_cells(2, 2, cells).unwrap();
        grid.cell_mut(0, 0).unwrap().retain_only(&b);

        let sites = propagate(&mut grid, &model, 0, 0, b).unwrap();
        assert_eq!(
            sites,
            vec![ContradictionSite {
                position: (0, 1),
                trigger: b,
                origin: (0, 0),
                direction: Direction::Down,
            }]
        );
        // Already collapsed neighbor keeps its tile
        assert_eq!(grid.cell(1, 0).unwrap().state(), CellState::Collapsed(a));
        assert_eq!(grid.contradiction_positions(), vec![(0, 1)]);

        let text = sites.first().map(ToString::to_string).unwrap_or_default();
        assert!(text.starts_with("(0, 1) emptied by tile"));
        assert!(text.ends_with("at (0, 0) looking down"));
    }

    // Tests propagation leaves cells already in contradiction alone
    // Verified by counting the same empty cell twice
    #[test]
    fn test_propagate_skips_empty_neighbors() {
        let a = tile_of('A', 1);
        let cells = vec![SuperpositionCell::from_candidates([(a, 1)]), open_cell("")];
        let mut grid = OutputGrid::from_cells(2, 1, cells).unwrap();

        let mut model = AdjacencyModel::new();
        model.record(a, Direction::Right, a);

        assert!(propagate(&mut grid, &model, 0, 0, a).unwrap().is_empty());
        assert!(propagate(&mut grid, &model, 5, 0, a).is_err());
    }
}
