//! Compile-time-specialized interface access.
//!
//! A [`Specialized`] view wraps a [`Plugin`] handle by shared reference and
//! carries a type-level list of interfaces it promises fast access to. Whether
//! a requested interface is in that list is decided entirely during
//! compilation, by recursing over the list's type structure: each
//! monomorphization of [`Specialized::interface`] either collapses to a direct
//! slot read (listed) or to a plain delegation to the generic map lookup
//! (unlisted). The per-node identity test compares two `TypeId` constants,
//! which optimizes to nothing; no string is hashed and no map is consulted on
//! the specialized path.
//!
//! Lists are written with the [`spec_list!`]( crate::spec_list ) macro:
//!
//! ```
//! # use dyn_link::{ interface, spec_list, Library, PluginRegistry, PluginRegistration };
//! # trait Up { fn up( &self ); }
//! # trait Down { fn down( &self ); }
//! # interface!( dyn Up, "demo::Up" );
//! # interface!( dyn Down, "demo::Down" );
//! type FastInterfaces = spec_list![ dyn Up, dyn Down ];
//! ```

use self::sealed::ListOps ;
use crate::interface::{ Interface, InterfaceView };
use crate::plugin::Plugin ;



/// Builds the type-level interface list consumed by [`Specialized`].
///
/// `spec_list![ dyn A, dyn B ]` expands to nested
/// [`SpecCons`]/[`SpecNil`] nodes, one slot per listed interface. A duplicated
/// entry occupies a redundant slot; the first occurrence answers every query,
/// so duplication is a configuration wart, never a runtime fault.
#[macro_export]
macro_rules! spec_list {
	() => ( $crate::specialization::SpecNil );
	( $head:ty $(, $tail:ty )* $(,)? ) => (
		$crate::specialization::SpecCons<$head, $crate::spec_list!( $( $tail ),* )>
	);
}

/// Terminator of a specialized interface list.
pub struct SpecNil ;

/// One node of a specialized interface list: a direct slot for `Head`, then
/// the rest of the list.
pub struct SpecCons<Head: ?Sized + 'static, Tail> {
	slot: Option<InterfaceView<Head>>,
	tail: Tail,
}

/// Outcome of searching a specialized list for one interface.
pub(crate) enum Resolution<'plugin, I: ?Sized> {
	/// The interface is in the list; its slot held this (possibly absent) view.
	Specialized( Option<&'plugin I> ),
	/// The interface is not in the list; the caller falls through to the
	/// generic path.
	Unlisted,
}

mod sealed {

	use std::any::TypeId ;

	use super::{ Resolution, SpecCons, SpecNil };
	use crate::interface::{ Interface, InterfaceView };
	use crate::plugin::Plugin ;

	/// Slot population and lookup, deliberately unnameable outside the crate.
	///
	/// The views inside slots are raw and only valid while the plugin they were
	/// captured from is; [`Specialized`]( super::Specialized ) holds that
	/// borrow for its whole lifetime and is the sole caller of `attach`. A
	/// public `attach` would let safe code detach slots from any borrow and
	/// read them after the plugin is gone.
	pub trait ListOps: Sized {

		/// Populates every slot from `plugin` with one generic lookup each.
		fn attach( plugin: &Plugin ) -> Self ;

		/// Type-level recursive search for `I`. Monomorphizes to a direct slot
		/// read when `I` is in the list, or to [`Resolution::Unlisted`] when
		/// the recursion runs off the end.
		fn find<I: Interface + ?Sized>( &self ) -> Resolution<'_, I> ;

	}

	impl ListOps for SpecNil {

		fn attach( _plugin: &Plugin ) -> Self {
			SpecNil
		}

		#[inline( always )]
		fn find<I: Interface + ?Sized>( &self ) -> Resolution<'_, I> {
			Resolution::Unlisted
		}

	}

	impl<Head: Interface + ?Sized, Tail: ListOps> ListOps for SpecCons<Head, Tail> {

		fn attach( plugin: &Plugin ) -> Self {
			Self {
				// A listed interface the instance does not implement leaves an
				// empty slot; querying it is as absent as on the generic path.
				slot: plugin.interface::<Head>().map( InterfaceView::of ),
				tail: Tail::attach( plugin ),
			}
		}

		#[inline( always )]
		fn find<I: Interface + ?Sized>( &self ) -> Resolution<'_, I> {
			// Both operands are compile-time constants of this monomorphization,
			// so exactly one arm survives optimization.
			if TypeId::of::<I>() == TypeId::of::<Head>() {
				Resolution::Specialized(
					self.slot.as_ref().map(| view | {
						// SAFETY: I == Head per the TypeId guard above, and
						// slots are only ever populated through
						// `Specialized::new`, whose plugin borrow outlives
						// `self`.
						unsafe { view.cast::<I>().get() }
					}),
				)
			} else {
				self.tail.find::<I>()
			}
		}

	}

}

/// A fixed, compile-time list of interfaces with one populated slot each.
///
/// A marker bound, implemented only by [`SpecCons`]/[`SpecNil`] chains as
/// produced by [`spec_list!`]( crate::spec_list ); the trait is sealed and
/// carries no callable surface. Slots are populated and queried exclusively
/// through [`Specialized`], which ties them to the plugin borrow they point
/// into.
pub trait SpecList: sealed::ListOps {}

impl SpecList for SpecNil {}
impl<Head: Interface + ?Sized, Tail: SpecList> SpecList for SpecCons<Head, Tail> {}

/// A statically-typed wrapper over a [`Plugin`] handle, layering a zero-lookup
/// fast path for the interfaces in `L` over the handle's generic access.
///
/// The view borrows the handle: it neither shortens nor extends its lifetime,
/// and any number of views plus generic access may coexist over the same
/// instance, all observing the same underlying state.
///
/// Construction performs one generic lookup per listed interface; every
/// subsequent [`interface`]( Specialized::interface ) call for a listed type
/// is a compile-time-addressed slot read, strictly cheaper than the generic
/// map lookup for any instance. Unlisted types fall through unconditionally to
/// [`Plugin::interface`].
pub struct Specialized<'plugin, L: SpecList> {
	handle: &'plugin Plugin,
	slots: L,
}

impl<'plugin, L: SpecList> Specialized<'plugin, L> {

	/// Wraps `handle`, populating one slot per interface listed in `L`.
	pub fn new( handle: &'plugin Plugin ) -> Self {
		Self { handle, slots: L::attach( handle ) }
	}

	/// Retrieves the instance's view of interface `I`.
	///
	/// Resolution regime is selected at compile time: slot read if `I` is
	/// listed in `L`, generic fallthrough otherwise. Absence of the interface
	/// yields `None` on either regime, exactly like the generic path.
	pub fn interface<I: Interface + ?Sized>( &self ) -> Option<&I> {
		match self.slots.find::<I>() {
			Resolution::Specialized( view ) => view,
			Resolution::Unlisted => self.handle.interface::<I>(),
		}
	}

	/// The wrapped generic handle.
	#[inline] pub fn handle( &self ) -> &'plugin Plugin { self.handle }

}

impl<L: SpecList> std::fmt::Debug for Specialized<'_, L> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Specialized" )
			.field( "handle", &self.handle )
			.field( "slots", &std::any::type_name::<L>() )
			.finish()
	}
}
