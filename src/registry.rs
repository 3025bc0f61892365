//! Plugin registration records and the per-library registry.
//!
//! A library exports its complete registry in one shot through a single,
//! stably-named entry point ([`REGISTRY_SYMBOL`]) which the loader invokes
//! immediately after mapping the library. Partial or incremental registration
//! is not supported; once published, records are never mutated.

use std::any::Any ;
use std::collections::HashMap ;
use std::marker::PhantomData ;

use itertools::Itertools ;
use log::warn ;

use crate::interface::{ ErasedView, Interface, InterfaceView };



/// ABI handshake value. Bumped whenever the types crossing the entry point
/// change shape. The loader refuses libraries whose reported value differs.
pub const ABI_VERSION: u64 = 1 ;

/// Symbol name of the registration entry point every plugin library exports.
/// Generated by [`export_registry!`]( crate::export_registry ).
pub const REGISTRY_SYMBOL: &str = "dyn_link_registry" ;

/// Symbol name of the ABI handshake function, probed before [`REGISTRY_SYMBOL`].
pub const ABI_SYMBOL: &str = "dyn_link_abi" ;

/// Signature of the function behind [`REGISTRY_SYMBOL`].
pub(crate) type RegistryEntryPoint = unsafe extern "C" fn() -> *mut PluginRegistry ;

/// Signature of the function behind [`ABI_SYMBOL`].
pub(crate) type AbiEntryPoint = unsafe extern "C" fn() -> u64 ;

/// The opaque instance a factory produces. Concrete plugin types are erased
/// behind `Any` so the host never needs them at compile time.
pub(crate) type OpaqueInstance = Box<dyn Any + Send + Sync> ;

type Factory = Box<dyn Fn() -> OpaqueInstance + Send + Sync> ;
type Attach = Box<dyn Fn( &( dyn Any + Send + Sync )) -> Option<ErasedView> + Send + Sync> ;

/// Exports a library's registration entry points.
///
/// Expands to the two `extern "C"` functions the
/// [loader]( crate::Library::load ) resolves: an ABI handshake and the
/// one-shot registry constructor. Invoke once at the top level of a
/// `cdylib` plugin crate:
///
/// ```ignore
/// use dyn_link::{ export_registry, PluginRegistry, PluginRegistration };
///
/// fn registry() -> PluginRegistry {
/// 	PluginRegistry::from_iter([
/// 		PluginRegistration::of( "pkg::MyPlugin", MyPlugin::default )
/// 			.implements::<dyn MyInterface>(| plugin | plugin )
/// 			.finish(),
/// 	])
/// }
///
/// export_registry!( registry() );
/// ```
///
/// The registry crosses the module boundary as a Rust value, so host and
/// plugin must be built with the same toolchain and the same version of this
/// crate. The ABI handshake catches version skew before any Rust type is
/// touched.
#[macro_export]
macro_rules! export_registry {
	( $build:expr ) => {

		#[no_mangle]
		pub extern "C" fn dyn_link_abi() -> u64 {
			$crate::ABI_VERSION
		}

		#[no_mangle]
		pub extern "C" fn dyn_link_registry() -> *mut $crate::PluginRegistry {
			let registry: $crate::PluginRegistry = $build ;
			Box::into_raw( Box::new( registry ))
		}

	};
}

/// One plugin class a library exports: its name, a factory producing fresh
/// opaque instances, and the set of interfaces those instances implement.
///
/// Immutable once published. Built through [`PluginRegistration::of`], which
/// carries the concrete type long enough to derive the type-erasure machinery,
/// then sealed with [`RegistrationBuilder::finish`].
pub struct PluginRegistration {
	/// Class name, unique within a registry (e.g., "pkg::EchoPlugin").
	class_name: String,
	/// Produces a fresh opaque instance.
	factory: Factory,
	/// One entry per implemented interface, in declaration order.
	interfaces: Vec<InterfaceEntry>,
}

/// Links an interface's canonical name to the function that derives its
/// type-erased view from a fresh instance.
struct InterfaceEntry {
	name: &'static str,
	attach: Attach,
}

impl PluginRegistration {

	/// Starts a registration for concrete plugin type `C`.
	///
	/// The factory is invoked once per [`instantiate`]( crate::Library::instantiate )
	/// call; each instance is independent.
	pub fn of<C, F>( class_name: impl Into<String>, factory: F ) -> RegistrationBuilder<C>
	where
		C: Any + Send + Sync,
		F: Fn() -> C + Send + Sync + 'static,
	{
		RegistrationBuilder {
			registration: Self {
				class_name: class_name.into(),
				factory: Box::new( move || Box::new( factory() )),
				interfaces: Vec::new(),
			},
			_class: PhantomData,
		}
	}

	/// Class name, unique within a registry.
	#[inline] pub fn class_name( &self ) -> &str { &self.class_name }

	/// Canonical names of the interfaces instances of this class implement,
	/// in declaration order.
	pub fn interface_names( &self ) -> impl Iterator<Item = &'static str> + '_ {
		self.interfaces.iter().map(| entry | entry.name )
	}

	/// Invokes the factory, producing a fresh opaque instance.
	pub(crate) fn instantiate( &self ) -> OpaqueInstance {
		( self.factory )()
	}

	/// Builds the interface map for `instance`: one view per declared interface,
	/// keyed by canonical name. Populated once, immutable afterward.
	pub(crate) fn attach_views( &self, instance: &( dyn Any + Send + Sync )) -> HashMap<&'static str, ErasedView> {
		self.interfaces.iter()
			.filter_map(| entry | match ( entry.attach )( instance ) {
				Some( view ) => Some(( entry.name, view )),
				None => {
					// Unreachable through the typed builder; only a registration
					// attached to a foreign instance could get here.
					warn!( "interface {} does not attach to instances of {}", entry.name, self.class_name );
					None
				}
			})
			.collect()
	}

}

impl std::fmt::Debug for PluginRegistration {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "PluginRegistration" )
			.field( "class_name", &self.class_name )
			.field( "interfaces", &self.interfaces.iter().map(| entry | entry.name ).collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

/// In-progress [`PluginRegistration`] still carrying its concrete type `C`.
#[must_use = "call .finish() to obtain the PluginRegistration"]
pub struct RegistrationBuilder<C> {
	registration: PluginRegistration,
	_class: PhantomData<fn() -> C>,
}

impl<C: Any + Send + Sync> RegistrationBuilder<C> {

	/// Declares that instances of `C` implement interface `I`.
	///
	/// `cast` performs the unsize coercion from the concrete type to the trait
	/// object; a plain `| plugin | plugin` closure suffices:
	///
	/// ```
	/// use dyn_link::{ interface, PluginRegistration };
	///
	/// trait Ping { fn ping( &self ) -> u32 ; }
	/// interface!( dyn Ping, "demo::Ping" );
	///
	/// #[derive( Default )]
	/// struct PingPlugin ;
	/// impl Ping for PingPlugin { fn ping( &self ) -> u32 { 1 } }
	///
	/// let registration = PluginRegistration::of( "demo::PingPlugin", PingPlugin::default )
	/// 	.implements::<dyn Ping>(| plugin | plugin )
	/// 	.finish();
	/// assert_eq!( registration.interface_names().collect::<Vec<_>>(), [ "demo::Ping" ]);
	/// ```
	pub fn implements<I: Interface + ?Sized>( mut self, cast: fn( &C ) -> &I ) -> Self {
		self.registration.interfaces.push( InterfaceEntry {
			name: I::CANONICAL_NAME,
			attach: Box::new( move | instance | instance
				.downcast_ref::<C>()
				.map(| concrete | InterfaceView::erased( cast( concrete )))),
		});
		self
	}

	/// Seals the registration. Records are immutable from here on.
	pub fn finish( self ) -> PluginRegistration {
		self.registration
	}

}

/// The complete set of plugin classes a library exports, keyed by class name.
///
/// Produced in one shot by the library's registration entry point and never
/// mutated afterward. An empty registry is a valid (if useless) export.
#[derive( Default, Debug )]
pub struct PluginRegistry {
	registrations: HashMap<String, PluginRegistration>,
}

impl PluginRegistry {

	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a registration. A duplicate class name replaces the earlier record
	/// with a logged warning; class names are expected to be unique.
	pub fn register( &mut self, registration: PluginRegistration ) {
		if self.registrations.contains_key( registration.class_name() ) {
			warn!( "duplicate registration for class {}, replacing earlier record", registration.class_name() );
		}
		self.registrations.insert( registration.class_name.clone(), registration );
	}

	/// Looks up a class by exact name match.
	pub fn get( &self, class_name: &str ) -> Option<&PluginRegistration> {
		self.registrations.get( class_name )
	}

	/// All registered class names, sorted.
	pub fn class_names( &self ) -> Vec<&str> {
		self.registrations.keys().map( String::as_str ).sorted().collect()
	}

	/// Number of registered classes.
	#[inline] pub fn len( &self ) -> usize { self.registrations.len() }

	/// Whether the registry exports no classes at all.
	#[inline] pub fn is_empty( &self ) -> bool { self.registrations.is_empty() }

}

impl FromIterator<PluginRegistration> for PluginRegistry {
	fn from_iter<T: IntoIterator<Item = PluginRegistration>>( registrations: T ) -> Self {
		let mut registry = Self::new();
		registrations.into_iter().for_each(| registration | registry.register( registration ));
		registry
	}
}
