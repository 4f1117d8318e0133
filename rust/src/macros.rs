//! Small code generators shared by the tree modules.

/// Implements [`BinaryLinks`](crate::types::BinaryLinks) for nodes whose key is
/// a plain field.
macro_rules! impl_binary_links {
    ($($node:ident { $key:ident }),+ $(,)?) => {
        $(
            impl $crate::types::BinaryLinks for $node {
                #[inline]
                fn left(&self) -> $crate::types::NodeId {
                    self.left
                }

                #[inline]
                fn right(&self) -> $crate::types::NodeId {
                    self.right
                }

                #[inline]
                fn key(&self) -> Option<$crate::types::Key> {
                    Some(self.$key)
                }
            }
        )+
    };
}

/// Generates `left_rotate` / `right_rotate` wrappers over a tree's
/// `rotate(node, Direction)`. Invoke inside the tree's `impl` block.
macro_rules! rotation_shorthands {
    ($ret:ty; $($dir:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Rotates `node` with `Direction::" $dir "`; see `rotate`."]
                pub fn [<$dir:lower _rotate>](&mut self, node: $crate::types::NodeId) -> $ret {
                    self.rotate(node, $crate::types::Direction::$dir)
                }
            )+
        }
    };
}

/// Generates `try_<op>` variants that validate the tree before and after
/// running `<op>(key)`. Invoke inside the tree's `impl` block; the tree must
/// provide `check_invariants_detailed`.
macro_rules! checked_mutations {
    ($($op:ident -> $ret:ty),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Runs `" $op "` between two invariant checks."]
                pub fn [<try_ $op>](
                    &mut self,
                    key: $crate::types::Key,
                ) -> $crate::error::ModifyResult<$ret> {
                    use $crate::error::TreeResultExt;

                    self.check_invariants_detailed()
                        .with_operation(concat!("before ", stringify!($op)))?;
                    let outcome = self.$op(key);
                    self.check_invariants_detailed()
                        .with_operation(concat!("after ", stringify!($op)))?;
                    Ok(outcome)
                }
            )+
        }
    };
}
