#[macro_export]
macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        /* ——————————————————— index new‑type ——————————————————— */

        $(#[$idx_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $idx_vis struct $Idx(pub usize);

        impl ::std::convert::From<usize> for $Idx {
            fn from(value: usize) -> Self {
                $Idx(value)
            }
        }

        impl ::std::convert::From<$Idx> for usize {
            fn from(value: $Idx) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $Idx {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        /* ——————————————————— vector new‑type ——————————————————— */

        $(#[$vec_meta])*
        #[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        /* --- Restricted indexing -------------------------------------------------- */

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        /* --- Delegated Vec<T> API ------------------------------------------------- */

        impl<T> $Vec<T> {
            /* construction */
            #[inline] pub fn new() -> Self { Self(::std::vec::Vec::new()) }

            /// A vector of `len` clones of `value`.
            #[inline] pub fn filled(len: usize, value: T) -> Self where T: Clone {
                Self(::std::vec![value; len])
            }

            /* capacity */
            #[inline] pub fn len(&self) -> usize { self.0.len() }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

            /* push */
            #[inline] pub fn push(&mut self, value: T) { self.0.push(value) }

            /* removal with the index new‑type, later entries shift down by one */
            #[inline] pub fn remove(&mut self, idx: $Idx) -> T { self.0.remove(idx.0) }

            /* get APIs using the index new‑type */
            #[inline] pub fn get(&self, idx: $Idx) -> Option<&T> { self.0.get(idx.0) }
            #[inline] pub fn get_mut(&mut self, idx: $Idx) -> Option<&mut T> { self.0.get_mut(idx.0) }

            /* iteration */
            #[inline] pub fn iter<'a>(&'a self) -> ::std::iter::Map<std::iter::Enumerate<std::slice::Iter<'a, T>>, fn((usize, &T)) -> ($Idx, &T)> { self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t)) }
            #[inline] pub fn iter_mut<'a>(&'a mut self) -> ::std::iter::Map<
                std::iter::Enumerate<std::slice::IterMut<'a, T>>,
                fn((usize, &mut T)) -> ($Idx, &mut T),
            > { self.0.iter_mut().enumerate().map(|(u, t)| ($Idx(u), t)) }
        }

        /* --- standard trait impls ------------------------------------------------- */

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            #[inline] fn from_iter<I: ::std::iter::IntoIterator<Item = T>>(it: I) -> Self {
                Self(::std::vec::Vec::from_iter(it))
            }
        }

        impl<'a, T> ::std::iter::IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = std::iter::Map<
                std::iter::Enumerate<std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            >;
            fn into_iter(self) -> Self::IntoIter {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
        }
    };
}
