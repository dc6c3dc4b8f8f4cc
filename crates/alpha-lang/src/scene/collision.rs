use super::{GameObject, Scene};

pub const COLLISION_COLOR: &str = "red";
pub const RESET_COLOR: &str = "black";

/// Overlap test between two `extent × extent` boxes. The comparisons are strict,
/// so boxes that only touch along an edge still collide.
pub fn is_colliding(a: &GameObject, b: &GameObject) -> bool {
    let (a, b) = (a.bounds(), b.bounds());
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}

/// One collision pass over every unordered pair, in insertion order.
///
/// Colliding collidable pairs turn red. Every other pair reverts its members
/// from red to black, including red that was set by the script.
pub fn check_collisions(scene: &mut Scene) {
    let objects = &mut scene.objects;
    for i in 0..objects.len() {
        for j in (i + 1)..objects.len() {
            let (head, tail) = objects.split_at_mut(j);
            let a = &mut head[i].1;
            let b = &mut tail[0].1;

            if a.collidable && b.collidable && is_colliding(a, b) {
                a.color = COLLISION_COLOR.to_string();
                b.color = COLLISION_COLOR.to_string();
            } else {
                reset(a);
                reset(b);
            }
        }
    }
}

fn reset(obj: &mut GameObject) {
    if obj.color == COLLISION_COLOR {
        obj.color = RESET_COLOR.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectDefaults;
    use crate::scene::Shape;

    fn at(x: f64, y: f64) -> GameObject {
        let mut obj = GameObject::new(Shape::Square, &ObjectDefaults::default());
        obj.x = x;
        obj.y = y;
        obj
    }

    fn color<'a>(scene: &'a Scene, name: &str) -> &'a str {
        scene.get(name).map(|o| o.color.as_str()).unwrap_or("<missing>")
    }

    #[test]
    fn overlapping_boxes_collide() {
        assert!(is_colliding(&at(0.0, 0.0), &at(40.0, 0.0)));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        assert!(!is_colliding(&at(0.0, 0.0), &at(51.0, 0.0)));
        assert!(!is_colliding(&at(0.0, 0.0), &at(0.0, 51.0)));
    }

    #[test]
    fn touching_edges_collide() {
        assert!(is_colliding(&at(0.0, 0.0), &at(50.0, 0.0)));
        assert!(is_colliding(&at(0.0, 0.0), &at(50.0, 50.0)));
    }

    #[test]
    fn collision_marks_both_red_then_reverts() {
        let mut scene = Scene::new();
        scene.insert("a", at(0.0, 0.0));
        scene.insert("b", at(40.0, 0.0));
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "a"), "red");
        assert_eq!(color(&scene, "b"), "red");

        if let Some(b) = scene.get_mut("b") { b.x = 51.0; }
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "a"), "black");
        assert_eq!(color(&scene, "b"), "black");
    }

    #[test]
    fn non_collidable_never_turns_red() {
        let mut scene = Scene::new();
        scene.insert("a", at(0.0, 0.0));
        let mut ghost = at(10.0, 10.0);
        ghost.collidable = false;
        scene.insert("ghost", ghost);
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "a"), "black");
        assert_eq!(color(&scene, "ghost"), "black");
    }

    #[test]
    fn manual_red_on_non_collidable_reverts() {
        let mut scene = Scene::new();
        let mut painted = at(0.0, 0.0);
        painted.collidable = false;
        painted.color = "red".into();
        scene.insert("painted", painted);
        scene.insert("far", at(500.0, 500.0));
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "painted"), "black");
    }

    #[test]
    fn other_colors_untouched() {
        let mut scene = Scene::new();
        let mut blue = at(0.0, 0.0);
        blue.color = "blue".into();
        scene.insert("blue", blue);
        scene.insert("far", at(500.0, 500.0));
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "blue"), "blue");
    }

    #[test]
    fn later_pairs_can_revert_an_earlier_hit() {
        // (a, b) collide, then (a, c) and (b, c) revert both
        let mut scene = Scene::new();
        scene.insert("a", at(0.0, 0.0));
        scene.insert("b", at(10.0, 0.0));
        scene.insert("c", at(500.0, 0.0));
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "a"), "black");
        assert_eq!(color(&scene, "b"), "black");

        let mut scene = Scene::new();
        scene.insert("c", at(500.0, 0.0));
        scene.insert("a", at(0.0, 0.0));
        scene.insert("b", at(10.0, 0.0));
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "a"), "red");
        assert_eq!(color(&scene, "b"), "red");
        assert_eq!(color(&scene, "c"), "black");
    }

    #[test]
    fn zero_size_collides_as_full_box() {
        let mut a = at(0.0, 0.0);
        a.size = 0.0;
        let b = at(40.0, 40.0);
        assert!(is_colliding(&a, &b));
        assert!(is_colliding(&b, &a));
    }

    #[test]
    fn single_object_is_untouched() {
        let mut scene = Scene::new();
        let mut lone = at(0.0, 0.0);
        lone.color = "red".into();
        scene.insert("lone", lone);
        check_collisions(&mut scene);
        assert_eq!(color(&scene, "lone"), "red");
    }
}
