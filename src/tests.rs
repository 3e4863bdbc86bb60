#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use itertools::Itertools;
    use ndarray::Array2;
    use petgraph::visit::Bfs;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use strum::VariantArray;

    use crate::board::{Board, Move, Outcome};
    use crate::builder::{BuilderInvalidReason, PuzzleBuilder};
    use crate::cell::Connectors;
    use crate::generator::{self, candidate_edges, kruskal};
    use crate::location::{Dimension, Location};
    use crate::shape::Direction;

    fn dims(width: usize, height: usize) -> (Dimension, Dimension) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    fn board_from_rows(rows: Vec<Vec<Connectors>>) -> Board {
        let (height, width) = (rows.len(), rows[0].len());
        let connectors = Array2::from_shape_vec((height, width), rows.into_iter().flatten().collect_vec()).unwrap();
        let mut board = Board::from_connectors(connectors).unwrap();
        board.propagate();
        board
    }

    fn connector_layout(board: &Board) -> Vec<Connectors> {
        board.pieces().map(|(_, piece)| piece.connectors()).collect_vec()
    }

    fn station_flags(board: &Board) -> Vec<bool> {
        board.pieces().map(|(_, piece)| piece.is_power_station()).collect_vec()
    }

    #[test]
    fn zero_dimension_is_invalid() {
        let err = Board::new_puzzle(0, 3, Some(1)).unwrap_err();
        assert_eq!(err.reasons, vec![BuilderInvalidReason::NonPositiveDimension { width: 0, height: 3 }]);
        assert_eq!(err.to_string(), "invalid puzzle configuration: board dimensions must be positive, got 0x3");

        assert!(PuzzleBuilder::new(4, 0).is_valid().is_some());
        assert!(PuzzleBuilder::new(4, 4).is_valid().is_none());
    }

    #[test]
    fn empty_weight_range_is_invalid() {
        let err = PuzzleBuilder::new(3, 3).weight_bound(0).build().unwrap_err();
        assert_eq!(err.reasons, vec![BuilderInvalidReason::EmptyWeightRange]);
    }

    #[test]
    fn single_cell_is_won() {
        let mut board = Board::new_puzzle(1, 1, Some(5)).unwrap();
        assert!(board.is_won());
        assert_eq!(board.station(), Location(1, 1));
        assert_eq!(board.cell_at(Location(1, 1)).unwrap().connectors(), Connectors::default());

        for _ in 0..4 {
            assert_eq!(board.play(Move::Rotate(Location(1, 1))), Outcome { changed: true, won: true });
        }
        for direction in Direction::VARIANTS {
            assert_eq!(board.play(Move::MoveStation(*direction)), Outcome { changed: false, won: true });
        }
        assert_eq!(format!("{}", board), "*\n");
    }

    #[test]
    fn row_of_three_connectivity() {
        let board = board_from_rows(vec![vec![
            Connectors::toward(&[Direction::Right]),
            Connectors::toward(&[Direction::Left, Direction::Right]),
            Connectors::toward(&[Direction::Left]),
        ]]);

        assert!(board.connected(Location(1, 1), Direction::Right));
        assert!(board.connected(Location(1, 2), Direction::Left));
        assert!(board.connected(Location(1, 2), Direction::Right));
        // edge of the board
        assert!(!board.connected(Location(1, 3), Direction::Right));
        assert!(!board.connected(Location(1, 1), Direction::Up));
        // off the board entirely
        assert!(!board.connected(Location(1, 4), Direction::Left));

        assert!(board.is_won());
        assert_eq!(format!("{}", board), "*━╸\n");
    }

    #[test]
    fn rotation_cuts_power() {
        let mut board = board_from_rows(vec![vec![
            Connectors::toward(&[Direction::Right]),
            Connectors::toward(&[Direction::Left, Direction::Right]),
            Connectors::toward(&[Direction::Left]),
        ]]);

        let outcome = board.play(Move::Rotate(Location(1, 2)));
        assert_eq!(outcome, Outcome { changed: true, won: false });
        assert_eq!(board.powered_count(), 1);
        assert!(!board.cell_at(Location(1, 3)).unwrap().is_powered());
        assert_eq!(format!("{}", board), "*│╴\n");

        board.play(Move::Rotate(Location(1, 2)));
        assert!(board.is_won());
    }

    #[test]
    fn lookups_out_of_bounds() {
        let mut board = Board::new_puzzle(5, 5, Some(3)).unwrap();
        assert!(board.cell_at(Location(0, 1)).is_none());
        assert!(board.cell_at(Location(1, 0)).is_none());
        assert!(board.cell_at(Location(6, 1)).is_none());
        assert!(board.cell_at(Location(5, 5)).is_some());

        assert_eq!(board.neighbor(Location(1, 1), Direction::Up), None);
        assert_eq!(board.neighbor(Location(1, 1), Direction::Left), None);
        assert_eq!(board.neighbor(Location(5, 5), Direction::Down), None);
        assert_eq!(board.neighbor(Location(5, 5), Direction::Up), Some(Location(4, 5)));
        assert_eq!(board.neighbor(Location(9, 9), Direction::Up), None);

        let before = connector_layout(&board);
        assert_eq!(board.play(Move::Rotate(Location(0, 3))), Outcome { changed: false, won: board.is_won() });
        assert!(!board.rotate(Location(3, 6)));
        assert_eq!(connector_layout(&board), before);
    }

    #[test]
    fn kruskal_prefers_light_edges() {
        // column-major enumeration on 2x2: (1,1)v, (1,1)>, (2,1)>, (1,2)v
        let edges = candidate_edges(dims(2, 2)).into_iter()
            .zip([7, 3, 3, 1])
            .map(|(edge, weight)| edge.with_weight(weight))
            .collect_vec();

        let tree = kruskal(dims(2, 2), edges);
        assert_eq!(tree.edges().iter().map(|e| (e.nodes.0, e.direction)).collect_vec(), vec![
            (Location(1, 2), Direction::Down),
            (Location(1, 1), Direction::Right),
            (Location(2, 1), Direction::Right),
        ]);

        let board = board_from_rows(tree.connectors().rows().into_iter().map(|row| row.to_vec()).collect_vec());
        assert_eq!(connector_layout(&board), vec![
            Connectors::toward(&[Direction::Right]),
            Connectors::toward(&[Direction::Left, Direction::Down]),
            Connectors::toward(&[Direction::Right]),
            Connectors::toward(&[Direction::Up, Direction::Left]),
        ]);
        assert!(board.is_won());
    }

    #[test]
    fn kruskal_ties_keep_enumeration_order() {
        let edges = candidate_edges(dims(2, 2)).into_iter()
            .map(|edge| edge.with_weight(2))
            .collect_vec();

        let tree = kruskal(dims(2, 2), edges);
        assert_eq!(tree.len(), 3);

        let connectors = tree.connectors();
        assert_eq!(connectors[(0, 0)], Connectors::toward(&[Direction::Down, Direction::Right]));
        assert_eq!(connectors[(0, 1)], Connectors::toward(&[Direction::Left]));
        assert_eq!(connectors[(1, 0)], Connectors::toward(&[Direction::Up, Direction::Right]));
        assert_eq!(connectors[(1, 1)], Connectors::toward(&[Direction::Left]));
    }

    #[test]
    fn unscrambled_boards_are_solved() {
        for seed in 0..20 {
            let board = PuzzleBuilder::new(6, 4).seed(seed).scramble(false).build().unwrap();
            assert!(board.is_won(), "seed {} generated an unsolved board:\n{}", seed, board);

            // a spanning tree on 24 cells has 23 edges, each opening two stubs
            let stubs: usize = board.pieces().map(|(_, piece)| piece.connectors().count()).sum();
            assert_eq!(stubs, 2 * 23);
            assert_eq!(board.wiring().edge_count(), 23);
        }
    }

    #[test]
    fn seeds_reproduce_boards() {
        let a = Board::new_puzzle(8, 6, Some(1234)).unwrap();
        let b = Board::new_puzzle(8, 6, Some(1234)).unwrap();
        assert_eq!(connector_layout(&a), connector_layout(&b));
        assert_eq!(format!("{}", a), format!("{}", b));

        let tiny_a = PuzzleBuilder::new(2, 2).seed(42).scramble(false).build().unwrap();
        let tiny_b = PuzzleBuilder::new(2, 2).seed(42).scramble(false).build().unwrap();
        assert_eq!(connector_layout(&tiny_a), connector_layout(&tiny_b));
        assert_eq!(tiny_a.wiring().edge_count(), 3);
    }

    #[test]
    fn seed_42_lays_out_a_known_square() {
        // weights drawn in enumeration order: (1,1)v 5, (1,1)> 17, (2,1)> 3, (1,2)v 23
        let board = PuzzleBuilder::new(2, 2).seed(42).scramble(false).build().unwrap();
        assert_eq!(connector_layout(&board), vec![
            Connectors::toward(&[Direction::Down, Direction::Right]),
            Connectors::toward(&[Direction::Left]),
            Connectors::toward(&[Direction::Up, Direction::Right]),
            Connectors::toward(&[Direction::Left]),
        ]);
        assert!(board.is_won());
        assert_eq!(format!("{}", board), "*╸
┗╸
");
    }

    #[test]
    fn seed_7_renders_known_boards() {
        let solved = PuzzleBuilder::new(4, 3).seed(7).scramble(false).build().unwrap();
        assert_eq!(format!("{}", solved), "*━┳╸
┣╸┗┓
╹╺━┛
");

        let scrambled = Board::new_puzzle(4, 3, Some(7)).unwrap();
        assert_eq!(scrambled.powered_count(), 2);
        assert_eq!(format!("{}", scrambled), "*│┴╶
┫╵┌┘
╶╴─┘
");
    }

    #[test]
    fn builder_and_generator_share_one_stream() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let tree = generator::generate(dims(5, 3), generator::DEFAULT_WEIGHT_BOUND, &mut rng);

        let board = PuzzleBuilder::new(5, 3).seed(99).scramble(false).build().unwrap();
        let expected = tree.connectors().iter().copied().collect_vec();
        assert_eq!(connector_layout(&board), expected);
    }

    #[test]
    fn scrambled_board_can_be_solved() {
        // weights are drawn before rotations, so both builds share a wiring layout
        let solved = PuzzleBuilder::new(7, 5).seed(8).scramble(false).build().unwrap();
        let mut board = PuzzleBuilder::new(7, 5).seed(8).build().unwrap();

        for (location, target) in solved.pieces() {
            let mut turns = 0;
            while board.cell_at(location).unwrap().connectors() != target.connectors() {
                assert!(turns < 4, "{} never matches its solved orientation", location);
                assert!(board.play(Move::Rotate(location)).changed);
                turns += 1;
            }
        }

        assert!(board.is_won());
        assert_eq!(board.powered_count(), 35);
    }

    #[test]
    fn station_moves_only_along_connections() {
        let mut board = PuzzleBuilder::new(6, 6).seed(21).scramble(false).build().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(77);

        for _ in 0..200 {
            let direction = Direction::VARIANTS[rng.gen_range(0..4)];
            let station = board.station();
            let was_connected = board.connected(station, direction);
            let before = station_flags(&board);

            let moved = board.move_station(direction);
            assert_eq!(moved, was_connected);

            let after = station_flags(&board);
            let flipped = before.iter().zip(&after).filter(|(b, a)| b != a).count();
            if moved {
                assert_eq!(flipped, 2);
                assert_eq!(board.station(), direction.attempt_from(station));
                assert!(!board.cell_at(station).unwrap().is_power_station());
            } else {
                assert_eq!(flipped, 0);
                assert_eq!(board.station(), station);
            }
            assert!(board.cell_at(board.station()).unwrap().is_power_station());
            assert_eq!(after.iter().filter(|flag| **flag).count(), 1);

            // an unscrambled board stays solved wherever the station goes
            board.propagate();
            assert!(board.is_won());
        }
    }

    #[test]
    fn move_station_does_not_propagate() {
        let mut board = board_from_rows(vec![vec![
            Connectors::toward(&[Direction::Right]),
            Connectors::toward(&[Direction::Left]),
            Connectors::default(),
        ]]);
        assert_eq!(board.powered_count(), 2);

        assert!(board.move_station(Direction::Right));
        assert_eq!(board.station(), Location(1, 2));
        assert!(!board.move_station(Direction::Right));

        // rotate the old station piece away; power is stale until the next propagation
        board.cell_at_mut(Location(1, 1)).unwrap().rotate_clockwise();
        assert_eq!(board.powered_count(), 2);
        assert_eq!(board.propagate(), 1);
    }

    #[test]
    fn keys_move_the_station() {
        let mut board = board_from_rows(vec![
            vec![Connectors::toward(&[Direction::Down]), Connectors::default()],
            vec![Connectors::toward(&[Direction::Up]), Connectors::default()],
        ]);
        assert_eq!(board.powered_count(), 2);

        assert_eq!(board.press("sideways"), Outcome { changed: false, won: false });
        assert_eq!(board.press("left"), Outcome { changed: false, won: false });
        assert_eq!(board.press("DOWN"), Outcome { changed: true, won: false });
        assert_eq!(board.station(), Location(2, 1));
        assert_eq!(board.press("north"), Outcome { changed: true, won: false });
        assert_eq!(board.station(), Location(1, 1));

        assert_eq!("West".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(Direction::Right.to_string(), "right");
    }

    #[test]
    fn propagation_matches_graph_search() {
        let mut board = Board::new_puzzle(9, 7, Some(2024)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..60 {
            let location = Location(rng.gen_range(1..=7), rng.gen_range(1..=9));
            board.play(Move::Rotate(location));

            let wiring = board.wiring();
            let mut bfs = Bfs::new(&wiring, board.station());
            let mut reachable = HashSet::new();
            while let Some(next) = bfs.next(&wiring) {
                reachable.insert(next);
            }

            let powered: HashSet<Location> = board.pieces()
                .filter(|(_, piece)| piece.is_powered())
                .map(|(location, _)| location)
                .collect();
            assert_eq!(powered, reachable);
            assert_eq!(board.is_won(), reachable.len() == 63);
        }
    }
}
