use super::constants::{SEGMENT_QUEUE_SIZE, SPACE_SPEED};
use super::math::{add, dot, normalize, rotate_y, scale, sub};
use super::types::{GridDir, GridPos, Point};
use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;

/// Cosine below which two unit directions count as exact opposites.
const OPPOSITE_DOT: f64 = -1.0 + 1e-9;

#[derive(Debug, Clone)]
pub struct GridSnake {
    segments: VecDeque<GridPos>,
    direction: GridDir,
    moved: GridDir,
}

impl GridSnake {
    pub fn new(start: GridPos) -> Self {
        let mut segments = VecDeque::with_capacity(16);
        segments.push_back(start);
        Self {
            segments,
            direction: GridDir::Right,
            moved: GridDir::Right,
        }
    }

    pub fn from_segments(segments: impl IntoIterator<Item = GridPos>, direction: GridDir) -> Self {
        let segments: VecDeque<GridPos> = segments.into_iter().collect();
        Self {
            segments,
            direction,
            moved: direction,
        }
    }

    pub fn head(&self) -> Option<GridPos> {
        self.segments.front().copied()
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &GridPos> + '_ {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn occupies(&self, pos: GridPos) -> bool {
        self.segments.contains(&pos)
    }

    pub fn direction(&self) -> GridDir {
        self.direction
    }

    /// Direction used by the most recent step.
    pub fn moved_direction(&self) -> GridDir {
        self.moved
    }

    /// Reversals are compared against the last step taken, so two quick turns between
    /// ticks cannot fold the head back onto the neck.
    pub fn set_direction(&mut self, direction: GridDir) -> bool {
        if self.segments.len() > 1 && direction == self.moved.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn candidate_head(&self) -> Option<GridPos> {
        self.head().map(|head| head.step(self.direction))
    }

    pub fn advance(&mut self, grow: bool) {
        let Some(next) = self.candidate_head() else { return };
        self.segments.push_front(next);
        if !grow {
            self.segments.pop_back();
        }
        self.moved = self.direction;
    }
}

#[derive(Debug, Clone)]
pub struct SpaceNode {
    pub position: Point,
    pub pos_queue: VecDeque<Option<Point>>,
}

impl SpaceNode {
    fn at(position: Point) -> Self {
        let mut pos_queue = VecDeque::with_capacity(SEGMENT_QUEUE_SIZE + 1);
        for _ in 0..SEGMENT_QUEUE_SIZE {
            pos_queue.push_back(None);
        }
        Self { position, pos_queue }
    }

    /// A node whose history runs back along `step`, as if it had travelled a straight line.
    fn trailing(position: Point, step: Point) -> Self {
        let pos_queue = (1..=SEGMENT_QUEUE_SIZE)
            .map(|k| Some(add(position, scale(step, k as f64))))
            .collect();
        Self { position, pos_queue }
    }
}

#[derive(Debug, Clone)]
pub struct SpaceSnake {
    nodes: Vec<SpaceNode>,
    raw_direction: Point,
    roll: u8,
    moved: Point,
}

impl SpaceSnake {
    pub fn new(start: Point) -> Self {
        let heading = Point::new(1.0, 0.0, 0.0);
        Self {
            nodes: vec![SpaceNode::at(start)],
            raw_direction: heading,
            roll: 0,
            moved: heading,
        }
    }

    pub fn from_positions(positions: impl IntoIterator<Item = Point>, heading: Point) -> Self {
        let heading = normalize(heading);
        Self {
            nodes: positions.into_iter().map(SpaceNode::at).collect(),
            raw_direction: heading,
            roll: 0,
            moved: heading,
        }
    }

    pub fn head(&self) -> Option<Point> {
        self.nodes.first().map(|node| node.position)
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Quarter turns about the vertical axis, 0..4.
    pub fn roll(&self) -> u8 {
        self.roll
    }

    pub fn roll_angle(&self) -> f64 {
        f64::from(self.roll) * FRAC_PI_2
    }

    pub fn direction(&self) -> Point {
        Self::rolled(self.raw_direction, self.roll)
    }

    pub fn moved_direction(&self) -> Point {
        self.moved
    }

    fn rolled(raw: Point, roll: u8) -> Point {
        let mut direction = raw;
        rotate_y(&mut direction, f64::from(roll) * FRAC_PI_2);
        normalize(direction)
    }

    fn reverses(&self, direction: Point) -> bool {
        self.nodes.len() > 1 && dot(direction, self.moved) <= OPPOSITE_DOT
    }

    pub fn set_input_direction(&mut self, raw: Point) -> bool {
        let raw = normalize(raw);
        if raw == Point::ORIGIN || self.reverses(Self::rolled(raw, self.roll)) {
            return false;
        }
        self.raw_direction = raw;
        true
    }

    /// Roll composes with the stored input, so it keeps applying to later inputs.
    pub fn apply_roll(&mut self, quarter_turns: i8) -> bool {
        let roll = (i16::from(self.roll) + i16::from(quarter_turns)).rem_euclid(4) as u8;
        if self.reverses(Self::rolled(self.raw_direction, roll)) {
            return false;
        }
        self.roll = roll;
        true
    }

    /// Points the effective direction at `target` without disturbing the roll state.
    pub fn steer_toward(&mut self, target: Point) -> bool {
        let mut raw = normalize(target);
        rotate_y(&mut raw, -self.roll_angle());
        self.set_input_direction(raw)
    }

    pub fn candidate_head(&self) -> Option<Point> {
        self.head()
            .map(|head| add(head, scale(self.direction(), SPACE_SPEED)))
    }

    /// Body nodes replay their predecessor's position history, which keeps them
    /// `SEGMENT_QUEUE_SIZE + 1` steps behind.
    pub fn advance(&mut self, grow: bool) {
        let Some(candidate) = self.candidate_head() else { return };
        let mut next_position: Option<Point> = None;

        for (index, node) in self.nodes.iter_mut().enumerate() {
            let old_position = node.position;
            if index == 0 {
                node.position = candidate;
            } else if let Some(next) = next_position {
                node.position = next;
            }
            node.pos_queue.push_front(Some(old_position));
            next_position = node.pos_queue.pop_back().unwrap_or(None);
        }

        self.moved = self.direction();
        if grow {
            match next_position {
                Some(position) => self.push_tail(position),
                None if self.nodes.len() == 1 => self.push_neck(),
                None => self.extend_tail(),
            }
        }
    }

    fn spacing() -> f64 {
        (SEGMENT_QUEUE_SIZE + 1) as f64 * SPACE_SPEED
    }

    /// Unit vector from `from` toward `to`, or straight back along the heading when they
    /// coincide.
    fn backward(&self, from: Point, to: Point) -> Point {
        let back = normalize(sub(to, from));
        if back == Point::ORIGIN {
            scale(self.moved, -1.0)
        } else {
            back
        }
    }

    /// The tail's dropped history point is exactly one spacing behind it on its path.
    fn push_tail(&mut self, position: Point) {
        let Some(tail) = self.nodes.last().map(|node| node.position) else { return };
        let step = scale(self.backward(tail, position), SPACE_SPEED);
        self.nodes.push(SpaceNode::trailing(position, step));
    }

    /// No history to follow yet: continue the line through the last two nodes.
    fn extend_tail(&mut self) {
        let before = self
            .nodes
            .len()
            .checked_sub(2)
            .and_then(|index| self.nodes.get(index))
            .map(|node| node.position);
        let (Some(before), Some(tail)) = (before, self.nodes.last().map(|node| node.position)) else {
            return;
        };
        let back = self.backward(before, tail);
        let position = add(tail, scale(back, Self::spacing()));
        self.nodes
            .push(SpaceNode::trailing(position, scale(back, SPACE_SPEED)));
    }

    /// A lone head has no trail to grow from, so the first body node is placed one
    /// spacing behind it and the head's history is synthesized along the heading.
    fn push_neck(&mut self) {
        let behind = scale(self.moved, -SPACE_SPEED);
        let Some(head) = self.nodes.first_mut() else { return };
        *head = SpaceNode::trailing(head.position, behind);
        let neck = add(head.position, scale(normalize(behind), Self::spacing()));
        self.nodes.push(SpaceNode::trailing(neck, behind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::math::distance;

    #[test]
    fn grid_advance_keeps_length_without_growth() {
        let mut snake = GridSnake::from_segments(
            [GridPos::new(5, 5), GridPos::new(4, 5), GridPos::new(3, 5)],
            GridDir::Right,
        );
        for _ in 0..4 {
            snake.advance(false);
            assert_eq!(snake.len(), 3);
        }
        assert_eq!(snake.head(), Some(GridPos::new(9, 5)));
    }

    #[test]
    fn grid_growth_adds_exactly_one_segment() {
        let mut snake = GridSnake::new(GridPos::new(5, 5));
        snake.advance(true);
        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![GridPos::new(6, 5), GridPos::new(5, 5)]
        );
    }

    #[test]
    fn grid_reverse_is_ignored_only_when_longer_than_one() {
        let mut single = GridSnake::new(GridPos::new(5, 5));
        assert!(single.set_direction(GridDir::Left));
        assert_eq!(single.direction(), GridDir::Left);

        let mut long = GridSnake::from_segments([GridPos::new(5, 5), GridPos::new(4, 5)], GridDir::Right);
        assert!(!long.set_direction(GridDir::Left));
        assert_eq!(long.direction(), GridDir::Right);
    }

    #[test]
    fn grid_two_quick_turns_cannot_reverse_between_steps() {
        let mut snake = GridSnake::from_segments([GridPos::new(5, 5), GridPos::new(4, 5)], GridDir::Right);
        assert!(snake.set_direction(GridDir::Up));
        assert!(!snake.set_direction(GridDir::Left));
        assert_eq!(snake.direction(), GridDir::Up);
    }

    #[test]
    fn space_head_moves_by_speed_along_direction() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        snake.advance(false);
        let head = snake.head().expect("head");
        assert!((head.x - SPACE_SPEED).abs() < 1e-12);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn space_body_trails_at_queue_spacing() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        snake.advance(true);
        assert_eq!(snake.len(), 2);
        for _ in 0..(SEGMENT_QUEUE_SIZE * 3) {
            snake.advance(false);
        }
        let positions: Vec<Point> = snake.positions().collect();
        let gap = distance(positions[0], positions[1]);
        assert!((gap - (SEGMENT_QUEUE_SIZE + 1) as f64 * SPACE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn first_growth_places_neck_one_spacing_behind() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        snake.advance(true);
        let positions: Vec<Point> = snake.positions().collect();
        let spacing = (SEGMENT_QUEUE_SIZE + 1) as f64 * SPACE_SPEED;
        assert!((distance(positions[0], positions[1]) - spacing).abs() < 1e-9);

        snake.advance(false);
        let moved: Vec<Point> = snake.positions().collect();
        assert!((distance(positions[1], moved[1]) - SPACE_SPEED).abs() < 1e-9);
    }

    fn assert_even_trail(snake: &SpaceSnake) {
        let spacing = (SEGMENT_QUEUE_SIZE + 1) as f64 * SPACE_SPEED;
        let positions: Vec<Point> = snake.positions().collect();
        for pair in positions.windows(2) {
            assert!((distance(pair[0], pair[1]) - spacing).abs() < 1e-9);
        }
    }

    #[test]
    fn later_growth_trails_without_jumping() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        snake.advance(true);
        for _ in 0..30 {
            snake.advance(false);
        }
        snake.advance(true);
        assert_eq!(snake.len(), 3);
        assert_even_trail(&snake);

        for _ in 0..30 {
            let before: Vec<Point> = snake.positions().collect();
            snake.advance(false);
            for (old, new) in before.iter().zip(snake.positions()) {
                assert!(distance(*old, new) <= SPACE_SPEED + 1e-9);
            }
            assert_even_trail(&snake);
        }
    }

    #[test]
    fn back_to_back_growth_keeps_the_spacing() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        for _ in 0..3 {
            snake.advance(true);
        }
        assert_eq!(snake.len(), 4);
        assert_even_trail(&snake);

        for _ in 0..20 {
            snake.advance(false);
            assert_even_trail(&snake);
        }
    }

    #[test]
    fn four_rolls_return_to_identity() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        for _ in 0..4 {
            assert!(snake.apply_roll(1));
        }
        assert_eq!(snake.roll(), 0);
        assert!(snake.apply_roll(-1));
        assert!(snake.apply_roll(1));
        assert_eq!(snake.roll_angle() % (std::f64::consts::PI * 2.0), 0.0);
    }

    #[test]
    fn roll_persists_across_later_inputs() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        snake.apply_roll(1);
        snake.set_input_direction(Point::new(1.0, 0.0, 0.0));
        let direction = snake.direction();
        assert!(direction.x.abs() < 1e-9);
        assert!((direction.z + 1.0).abs() < 1e-9);
    }

    #[test]
    fn space_reverse_rejected_for_long_snake() {
        let mut snake = SpaceSnake::from_positions(
            [Point::ORIGIN, Point::new(-1.0, 0.0, 0.0)],
            Point::new(1.0, 0.0, 0.0),
        );
        assert!(!snake.set_input_direction(Point::new(-1.0, 0.0, 0.0)));
        assert!(snake.apply_roll(1));
        assert!(!snake.apply_roll(1));
    }

    #[test]
    fn steer_toward_compensates_for_roll() {
        let mut snake = SpaceSnake::new(Point::ORIGIN);
        snake.apply_roll(1);
        assert!(snake.steer_toward(Point::new(0.0, 0.0, 1.0)));
        let direction = snake.direction();
        assert!((direction.z - 1.0).abs() < 1e-9);
        assert_eq!(snake.roll(), 1);
    }
}
