//! Integration tests for flex layout behavior.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trellis::{
        AlignContent, AlignItems, AlignSelf, Basis, Direction, Fixed, ItemId, Justify, Tree,
        Wrap,
        error::{Error, Result},
        geom::{Rect, Sides, Size, UNDEFINED},
        style::Style,
    };

    /// Create a container with one child per style and lay it out.
    fn laid_out(container: Style, children: &[Style]) -> Result<(Tree, ItemId, Vec<ItemId>)> {
        let mut tree = Tree::new();
        let root = tree.new_item(container)?;
        let mut ids = Vec::new();
        for style in children {
            let id = tree.new_item(*style)?;
            tree.add(root, id)?;
            ids.push(id);
        }
        tree.layout(root)?;
        Ok((tree, root, ids))
    }

    /// Frames of a list of items.
    fn frames(tree: &Tree, ids: &[ItemId]) -> Result<Vec<Rect>> {
        ids.iter().map(|id| tree.frame(*id)).collect()
    }

    #[test]
    fn root_frame_is_its_size() -> Result<()> {
        let (tree, root, _) = laid_out(Style::row().size(120.0, 80.0), &[])?;
        assert_eq!(tree.frame(root)?, Rect::new(0.0, 0.0, 120.0, 80.0));
        Ok(())
    }

    #[test]
    fn grow_is_proportional() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 10.0),
            &[
                Style::row().width(30.0).grow(1.0),
                Style::row().width(30.0).grow(3.0),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 0.0, 40.0, 10.0),
                Rect::new(40.0, 0.0, 60.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn shrink_is_proportional() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 10.0),
            &[Style::row().width(55.0), Style::row().width(55.0)],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 0.0, 50.0, 10.0),
                Rect::new(50.0, 0.0, 50.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn zero_shrink_overflows() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 10.0),
            &[
                Style::row().width(60.0).shrink(0.0),
                Style::row().width(60.0).shrink(0.0),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 0.0, 60.0, 10.0),
                Rect::new(60.0, 0.0, 60.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn grow_conserves_main_space() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(200.0, 20.0).padding(Sides::all(10.0)),
            &[
                Style::row()
                    .width(20.0)
                    .grow(1.0)
                    .margin(Sides::new(5.0, 0.0, 5.0, 0.0)),
                Style::row().width(30.0).grow(2.0),
            ],
        )?;
        let f = frames(&tree, &ids)?;
        assert_eq!(f[0], Rect::new(15.0, 10.0, 60.0, 0.0));
        assert_eq!(f[1], Rect::new(80.0, 10.0, 110.0, 0.0));
        assert_eq!(f[1].tl.x + f[1].w, 190.0);
        Ok(())
    }

    #[test]
    fn order_changes_sequence_not_structure() -> Result<()> {
        let (tree, root, ids) = laid_out(
            Style::row().size(100.0, 10.0),
            &[
                Style::row().width(10.0).order(2),
                Style::row().width(10.0),
                Style::row().width(10.0).order(1),
            ],
        )?;
        assert_eq!(tree.frame(ids[1])?.tl.x, 0.0);
        assert_eq!(tree.frame(ids[2])?.tl.x, 10.0);
        assert_eq!(tree.frame(ids[0])?.tl.x, 20.0);
        assert_eq!(tree.children(root)?, ids.as_slice());
        Ok(())
    }

    #[test]
    fn equal_order_keeps_insertion_order() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 10.0),
            &[
                Style::row().width(10.0).order(1),
                Style::row().width(10.0).order(-1),
                Style::row().width(10.0).order(1),
            ],
        )?;
        let xs: Vec<f32> = frames(&tree, &ids)?.iter().map(|f| f.tl.x).collect();
        assert_eq!(xs, vec![10.0, 0.0, 20.0]);
        Ok(())
    }

    #[test]
    fn space_between_positions() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 10.0).justify(Justify::SpaceBetween),
            &[Style::row().width(10.0); 3],
        )?;
        let xs: Vec<f32> = frames(&tree, &ids)?.iter().map(|f| f.tl.x).collect();
        assert_eq!(xs, vec![0.0, 45.0, 90.0]);
        Ok(())
    }

    #[test]
    fn justify_variants() -> Result<()> {
        let cases = [
            (Justify::Start, vec![0.0, 10.0]),
            (Justify::End, vec![80.0, 90.0]),
            (Justify::Center, vec![40.0, 50.0]),
            (Justify::SpaceAround, vec![20.0, 70.0]),
            (Justify::SpaceEvenly, vec![26.666_668, 63.333_336]),
        ];
        for (justify, expected) in cases {
            let (tree, _, ids) = laid_out(
                Style::row().size(100.0, 10.0).justify(justify),
                &[Style::row().width(10.0); 2],
            )?;
            let xs: Vec<f32> = frames(&tree, &ids)?.iter().map(|f| f.tl.x).collect();
            for (x, e) in xs.iter().zip(&expected) {
                assert!((x - e).abs() < 1e-3, "{justify:?}: {xs:?} != {expected:?}");
            }
        }
        Ok(())
    }

    #[test]
    fn space_between_single_child_sits_at_start() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 10.0).justify(Justify::SpaceBetween),
            &[Style::row().width(10.0)],
        )?;
        assert_eq!(tree.frame(ids[0])?.tl.x, 0.0);
        Ok(())
    }

    #[test]
    fn grow_suppresses_justify() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 10.0).justify(Justify::End),
            &[Style::row().width(10.0), Style::row().width(10.0).grow(1.0)],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Rect::new(10.0, 0.0, 90.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn reverse_direction_places_from_end() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row()
                .size(100.0, 10.0)
                .direction(Direction::RowReverse),
            &[Style::row().width(10.0), Style::row().width(20.0)],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(90.0, 0.0, 10.0, 10.0),
                Rect::new(70.0, 0.0, 20.0, 10.0),
            ]
        );

        let (tree, _, ids) = laid_out(
            Style::column()
                .size(10.0, 100.0)
                .direction(Direction::ColumnReverse)
                .padding(Sides::new(0.0, 0.0, 0.0, 5.0)),
            &[Style::row().height(10.0)],
        )?;
        assert_eq!(tree.frame(ids[0])?, Rect::new(0.0, 85.0, 10.0, 10.0));
        Ok(())
    }

    #[test]
    fn column_stacks_and_stretches() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::column().size(50.0, 100.0),
            &[
                Style::row().height(10.0),
                Style::row().height(20.0).margin(Sides::new(3.0, 2.0, 4.0, 0.0)),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 0.0, 50.0, 10.0),
                Rect::new(3.0, 12.0, 43.0, 20.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn cross_alignment() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row()
                .size(100.0, 50.0)
                .align_items(AlignItems::Center),
            &[
                Style::row()
                    .size(10.0, 10.0)
                    .margin(Sides::new(0.0, 4.0, 0.0, 0.0)),
                Style::row()
                    .size(10.0, 10.0)
                    .margin(Sides::new(0.0, 0.0, 0.0, 2.0))
                    .align_self(AlignSelf::End),
                Style::row().size(10.0, 10.0).align_self(AlignSelf::Start),
                Style::row().width(10.0).align_self(AlignSelf::Stretch),
            ],
        )?;
        let ys: Vec<(f32, f32)> = frames(&tree, &ids)?
            .iter()
            .map(|f| (f.tl.y, f.h))
            .collect();
        assert_eq!(
            ys,
            vec![(22.0, 10.0), (38.0, 10.0), (0.0, 10.0), (0.0, 50.0)]
        );
        Ok(())
    }

    #[test]
    fn basis_overrides_main_size() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(200.0, 10.0),
            &[
                Style::row()
                    .basis(Basis::Relative(0.25))
                    .margin(Sides::new(10.0, 0.0, 0.0, 0.0)),
                Style::row().width(100.0).basis(Basis::Length(30.0)),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(10.0, 0.0, 40.0, 10.0),
                Rect::new(50.0, 0.0, 30.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn wrap_breaks_at_boundary() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 100.0).wrap(Wrap::Wrap),
            &[Style::row().size(40.0, 10.0); 3],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 0.0, 40.0, 10.0),
                Rect::new(40.0, 0.0, 40.0, 10.0),
                Rect::new(0.0, 10.0, 40.0, 10.0),
            ]
        );

        // An exact fit stays on the line.
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 100.0).wrap(Wrap::Wrap),
            &[Style::row().size(50.0, 10.0); 2],
        )?;
        assert_eq!(tree.frame(ids[1])?, Rect::new(50.0, 0.0, 50.0, 10.0));
        Ok(())
    }

    #[test]
    fn wrap_reverse_stacks_from_cross_end() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 100.0).wrap(Wrap::WrapReverse),
            &[Style::row().size(60.0, 10.0); 2],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 90.0, 60.0, 10.0),
                Rect::new(0.0, 80.0, 60.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn align_content_stretch_settles_deferred_lines() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 100.0).wrap(Wrap::Wrap),
            &[
                Style::row().size(40.0, 20.0),
                Style::row().width(40.0),
                Style::row().size(60.0, 10.0),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 0.0, 40.0, 20.0),
                Rect::new(40.0, 0.0, 40.0, 55.0),
                Rect::new(0.0, 55.0, 60.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn wrap_reverse_settles_deferred_lines() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 100.0).wrap(Wrap::WrapReverse),
            &[
                Style::row().size(40.0, 20.0),
                Style::row().width(40.0),
                Style::row().size(60.0, 10.0),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 45.0, 40.0, 20.0),
                Rect::new(40.0, 45.0, 40.0, 55.0),
                Rect::new(0.0, 0.0, 60.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn align_content_variants() -> Result<()> {
        // (a.y, b.y, b.h, c.y): a and b share the first line, c wraps.
        let cases = [
            (AlignContent::Start, [0.0, 0.0, 20.0, 20.0]),
            (AlignContent::End, [70.0, 70.0, 20.0, 90.0]),
            (AlignContent::Center, [35.0, 35.0, 20.0, 55.0]),
            (AlignContent::SpaceBetween, [0.0, 0.0, 20.0, 90.0]),
            (AlignContent::SpaceAround, [17.5, 17.5, 20.0, 72.5]),
            (AlignContent::SpaceEvenly, [23.333_334, 23.333_334, 20.0, 66.666_67]),
            (AlignContent::Stretch, [0.0, 0.0, 55.0, 55.0]),
        ];
        for (align, expected) in cases {
            let (tree, _, ids) = laid_out(
                Style::row()
                    .size(100.0, 100.0)
                    .wrap(Wrap::Wrap)
                    .align_content(align),
                &[
                    Style::row().size(40.0, 20.0),
                    Style::row().width(40.0),
                    Style::row().size(60.0, 10.0),
                ],
            )?;
            let f = frames(&tree, &ids)?;
            let got = [f[0].tl.y, f[1].tl.y, f[1].h, f[2].tl.y];
            for (g, e) in got.iter().zip(&expected) {
                assert!((g - e).abs() < 1e-3, "{align:?}: {got:?} != {expected:?}");
            }
        }
        Ok(())
    }

    #[test]
    fn align_content_center_offsets_lines() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row()
                .size(100.0, 100.0)
                .wrap(Wrap::Wrap)
                .align_content(AlignContent::Center),
            &[
                Style::row().size(40.0, 20.0),
                Style::row().width(40.0),
                Style::row().size(60.0, 10.0),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(0.0, 35.0, 40.0, 20.0),
                Rect::new(40.0, 35.0, 40.0, 20.0),
                Rect::new(0.0, 55.0, 60.0, 10.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn absolute_items_leave_flow() -> Result<()> {
        let (tree, _, ids) = laid_out(
            Style::row().size(100.0, 100.0),
            &[
                Style::row().size(20.0, 20.0).absolute(5.0, 5.0, UNDEFINED, UNDEFINED),
                Style::row().width(10.0),
                Style::row()
                    .size(20.0, 20.0)
                    .absolute(UNDEFINED, UNDEFINED, 10.0, 10.0),
                Style::row().absolute(10.0, 30.0, 10.0, UNDEFINED),
            ],
        )?;
        assert_eq!(
            frames(&tree, &ids)?,
            vec![
                Rect::new(5.0, 5.0, 20.0, 20.0),
                Rect::new(0.0, 0.0, 10.0, 100.0),
                Rect::new(70.0, 70.0, 20.0, 20.0),
                Rect::new(10.0, 30.0, 80.0, 0.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn hidden_items_take_no_space() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.new_item(Style::row().size(100.0, 10.0))?;
        let a = tree.new_item(Style::row().width(10.0))?;
        let hidden = tree.new_item(Style::row().width(50.0))?;
        let inner = tree.new_item(Style::row().width(5.0))?;
        let c = tree.new_item(Style::row().width(10.0))?;
        for id in [a, hidden, c] {
            tree.add(root, id)?;
        }
        tree.add(hidden, inner)?;

        tree.layout(root)?;
        assert_eq!(tree.frame(hidden)?, Rect::new(10.0, 0.0, 50.0, 10.0));
        assert_eq!(tree.frame(c)?.tl.x, 60.0);

        tree.set_visible(hidden, false)?;
        tree.layout(root)?;
        assert_eq!(tree.frame(hidden)?, Rect::zero());
        assert_eq!(tree.frame(inner)?, Rect::zero());
        assert_eq!(tree.frame(c)?, Rect::new(10.0, 0.0, 10.0, 10.0));
        Ok(())
    }

    #[test]
    fn frames_are_relative_to_parent() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.new_item(Style::row().size(100.0, 100.0))?;
        let panel = tree.new_item(
            Style::column()
                .grow(1.0)
                .padding(Sides::all(5.0))
                .margin(Sides::new(10.0, 0.0, 0.0, 0.0)),
        )?;
        let leaf = tree.new_item(Style::row().height(10.0))?;
        tree.add(root, panel)?;
        tree.add(panel, leaf)?;
        tree.layout(root)?;
        assert_eq!(tree.frame(panel)?, Rect::new(10.0, 0.0, 90.0, 100.0));
        assert_eq!(tree.frame(leaf)?, Rect::new(5.0, 5.0, 80.0, 10.0));
        Ok(())
    }

    #[test]
    fn self_sizing_overrides_and_stretch_wins() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.new_item(Style::row().size(100.0, 20.0))?;
        let stretched = tree.new_item(Style::row())?;
        let started = tree.new_item(Style::row().align_self(AlignSelf::Start))?;
        let partial = tree.new_item(Style::row().width(12.0).align_self(AlignSelf::Start))?;
        for id in [stretched, started, partial] {
            tree.add(root, id)?;
        }
        tree.set_self_sizing(stretched, Fixed(Size::new(30.0, 7.0)))?;
        tree.set_self_sizing(started, Fixed(Size::new(30.0, 7.0)))?;
        tree.set_self_sizing(partial, |_id: ItemId, p: Size| Size::new(f32::NAN, p.h / 4.0))?;

        tree.layout(root)?;
        assert_eq!(tree.frame(stretched)?, Rect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(tree.frame(started)?, Rect::new(30.0, 0.0, 30.0, 7.0));
        assert_eq!(tree.frame(partial)?, Rect::new(60.0, 0.0, 12.0, 5.0));

        tree.clear_self_sizing(started)?;
        tree.layout(root)?;
        assert_eq!(tree.frame(started)?, Rect::new(30.0, 0.0, 0.0, 20.0));
        Ok(())
    }

    #[test]
    fn non_finite_hook_size_fails_layout() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.new_item(Style::row().size(100.0, 10.0))?;
        let child = tree.new_item(Style::row().width(30.0))?;
        tree.add(root, child)?;
        tree.layout(root)?;
        assert_eq!(tree.frame(child)?, Rect::new(0.0, 0.0, 30.0, 10.0));

        tree.set_self_sizing(child, |_id: ItemId, _p: Size| Size::new(f32::INFINITY, f32::NAN))?;
        assert_eq!(tree.layout(root), Err(Error::NanFrame(child)));
        // The failed pass commits nothing.
        assert_eq!(tree.frame(child)?, Rect::new(0.0, 0.0, 30.0, 10.0));
        Ok(())
    }

    #[test]
    fn layout_is_deterministic() -> Result<()> {
        let (mut tree, root, ids) = laid_out(
            Style::row()
                .size(90.0, 40.0)
                .wrap(Wrap::Wrap)
                .justify(Justify::SpaceAround),
            &[
                Style::row().width(30.0).grow(1.0),
                Style::row().size(50.0, 15.0),
                Style::row().width(20.0).order(-1),
            ],
        )?;
        let first = frames(&tree, &ids)?;
        let arranged = tree.arrange(root, Size::new(90.0, 40.0))?;
        for (id, frame) in ids.iter().zip(&first) {
            assert_eq!(arranged[*id], *frame);
        }
        tree.layout(root)?;
        assert_eq!(frames(&tree, &ids)?, first);
        Ok(())
    }

    #[test]
    fn measure_does_not_mutate() -> Result<()> {
        let (tree, root, ids) = laid_out(
            Style::row().size(100.0, 10.0),
            &[Style::row().width(60.0), Style::row().width(60.0)],
        )?;
        let before = frames(&tree, &ids)?;
        let m = tree.measure(root, Size::infinite())?;
        assert_eq!(m.size, Size::new(100.0, 10.0));
        assert_eq!(m.frames[ids[1]], Rect::new(60.0, 0.0, 60.0, 10.0));
        assert_eq!(frames(&tree, &ids)?, before);
        assert_eq!(before[1], Rect::new(50.0, 0.0, 50.0, 10.0));
        Ok(())
    }

    #[test]
    fn measure_reports_natural_size() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.new_item(Style::row().padding(Sides::new(1.0, 2.0, 3.0, 4.0)))?;
        let a = tree.new_item(Style::row().size(10.0, 8.0))?;
        let b = tree.new_item(
            Style::row()
                .size(15.0, 4.0)
                .margin(Sides::new(2.0, 0.0, 5.0, 1.0)),
        )?;
        tree.add(root, a)?;
        tree.add(root, b)?;
        let m = tree.measure(root, Size::infinite())?;
        // 1 + 10 + 2 + 15 + 5 + 3 wide, 2 + 8 + 4 high.
        assert_eq!(m.size, Size::new(36.0, 14.0));
        assert_eq!(m.frames[root], Rect::new(0.0, 0.0, 36.0, 14.0));

        let clamped = tree.measure(root, Size::new(20.0, f32::INFINITY))?;
        assert_eq!(clamped.size, Size::new(20.0, 14.0));
        Ok(())
    }
}
