//! A native plugin runtime for building modular applications.
//!
//! Plugins are independently compiled dynamic libraries instantiated by name at
//! runtime. A loaded library exports a registry of plugin *classes*; each class
//! declares the *interfaces* its instances implement. The host never names a
//! plugin's concrete type: it instantiates a class, then queries the opaque
//! instance for interfaces and receives either a usable reference or a defined
//! empty result.
//!
//! # Core Concepts
//!
//! - [`Interface`]: An object-safe trait a plugin instance may implement,
//! 	identified by a canonical fully-qualified name string that independently
//! 	compiled modules agree on. Declared with the [`interface!`] macro.
//!
//! - [`PluginRegistry`] / [`PluginRegistration`]: The complete set of classes a
//! 	library exports: class name, instance factory, implemented interface set.
//! 	Produced in one shot by the library's registration entry point (generated
//! 	by [`export_registry!`]) and immutable afterward.
//!
//! - [`Library`]: A reference-counted handle to a loaded library and its
//! 	registry. The OS mapping is released only once every handle clone and
//! 	every instance created from it has been dropped.
//!
//! - [`Plugin`]: A type-erased handle exclusively owning one instantiated
//! 	plugin object plus its immutable interface map. Generic interface access
//! 	resolves through that map at runtime.
//!
//! - [`Specialized`]( specialization::Specialized ): A statically-typed wrapper
//! 	over a `Plugin` carrying a compile-time interface list ([`spec_list!`]);
//! 	listed interfaces resolve through direct slots with no runtime lookup,
//! 	unlisted ones fall through to the generic path.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{ AtomicU64, Ordering };
//! use dyn_link::{ interface, spec_list, Library, PluginRegistry, PluginRegistration };
//!
//! // Interfaces are object-safe traits with a canonical cross-module name,
//! // declared in a crate shared by host and plugins.
//! trait Setter { fn set( &self, value: f64 ); }
//! trait Getter { fn get( &self ) -> f64 ; }
//! interface!( dyn Setter, "demo::Setter" );
//! interface!( dyn Getter, "demo::Getter" );
//!
//! // A plugin class implements any number of interfaces over shared state.
//! // Interface methods take `&self`; serializing mutation is the plugin's own
//! // documented contract, here discharged with an atomic.
//! #[derive( Default )]
//! struct GainPlugin { bits: AtomicU64 }
//!
//! impl Setter for GainPlugin {
//! 	fn set( &self, value: f64 ) { self.bits.store( value.to_bits(), Ordering::SeqCst ); }
//! }
//! impl Getter for GainPlugin {
//! 	fn get( &self ) -> f64 { f64::from_bits( self.bits.load( Ordering::SeqCst )) }
//! }
//!
//! // A plugin library hands this registry to the host through the entry point
//! // generated by `export_registry!`. In-process registries plug into the
//! // same machinery, which is what this example does.
//! let registry = PluginRegistry::from_iter([
//! 	PluginRegistration::of( "demo::GainPlugin", GainPlugin::default )
//! 		.implements::<dyn Setter>(| plugin | plugin )
//! 		.implements::<dyn Getter>(| plugin | plugin )
//! 		.finish(),
//! ]);
//!
//! let library = Library::from_registry( registry );
//! let plugin = library.instantiate( "demo::GainPlugin" )?;
//!
//! // Generic path: runtime lookup keyed by canonical name.
//! let setter = plugin.interface::<dyn Setter>().expect( "declared above" );
//!
//! // Specialized path: compile-time slot for every listed interface.
//! let view = plugin.specialized::<spec_list![ dyn Getter ]>();
//! let getter = view.interface::<dyn Getter>().expect( "declared above" );
//!
//! // Both paths alias the single owned instance.
//! setter.set( 11.1 );
//! assert!(( getter.get() - 11.1 ).abs() < 1e-8 );
//! # Ok::<(), dyn_link::InstantiationError>(())
//! ```
//!
//! # Loading From Disk
//!
//! Out-of-process plugins are `cdylib` crates that call [`export_registry!`]
//! once at the top level. The host resolves the library file through a
//! [`LibraryDirectory`] (search paths plus the platform naming convention) and
//! loads it:
//!
//! ```no_run
//! use dyn_link::{ Library, LibraryDirectory };
//!
//! let mut directory = LibraryDirectory::new();
//! directory.add_search_path( "/opt/my-app/plugins" );
//!
//! let path = directory.find_library( "dummy_plugin" )
//! 	.expect( "plugin not found on the search path" );
//! let library = Library::load( path )?;
//!
//! let plugin = library.instantiate( "dummy::DummyMultiPlugin" )?;
//! # let _ = plugin ;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The registry crosses the module boundary as a Rust value, so host and
//! plugin must share the toolchain and the version of this crate; the ABI
//! handshake ([`ABI_VERSION`]) rejects mismatched libraries before any Rust
//! type is exchanged. Loading is synchronous, performs no retries, and leaves
//! nothing behind on failure.
//!
//! # Interface Absence Is Not An Error
//!
//! Querying an interface the instance does not implement returns `None` on
//! both the generic and the specialized path. The engine has no opinion on
//! whether that is fatal; callers that require an interface decide for
//! themselves:
//!
//! ```
//! # use dyn_link::{ interface, Library, PluginRegistry, PluginRegistration };
//! # trait Exotic { fn poke( &self ); }
//! # interface!( dyn Exotic, "demo::Exotic" );
//! # #[derive( Default )] struct PlainPlugin ;
//! # let library = Library::from_registry( PluginRegistry::from_iter([
//! # 	PluginRegistration::of( "demo::PlainPlugin", PlainPlugin::default ).finish(),
//! # ]));
//! let plugin = library.instantiate( "demo::PlainPlugin" )?;
//! assert!( plugin.interface::<dyn Exotic>().is_none() );
//! # Ok::<(), dyn_link::InstantiationError>(())
//! ```
//!
//! # Concurrency
//!
//! Loading and instantiation are synchronous, single-call work on whichever
//! thread initiates them. The interface map is immutable after construction,
//! so concurrent interface lookups on one handle are safe; what a caller does
//! *through* a returned reference is governed by the plugin's own documented
//! thread-safety contract.

mod directory ;
mod interface ;
mod library ;
mod plugin ;
mod registry ;
pub mod specialization ;

pub use directory::{ LibraryDirectory, LIBRARY_PATH_ENV };
pub use interface::Interface ;
pub use library::{ Library, LoadError, LoadFailure };
pub use plugin::{ InstantiationError, Plugin };
pub use registry::{
	PluginRegistration, PluginRegistry, RegistrationBuilder,
	ABI_SYMBOL, ABI_VERSION, REGISTRY_SYMBOL,
};
pub use specialization::{ SpecList, Specialized };
