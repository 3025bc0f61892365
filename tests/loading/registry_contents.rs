use dyn_link::{ interface, PluginRegistration, PluginRegistry };

use crate::dummy ;

#[test]
fn class_names_are_sorted() {
	let registry = dummy::registry();
	assert_eq!( registry.class_names(), [ dummy::MULTI_PLUGIN, dummy::SINGLE_PLUGIN ]);
	assert_eq!( registry.len(), 2 );
}

#[test]
fn interface_names_keep_declaration_order() {
	let registry = dummy::registry();
	let declared: Vec<_> = registry.get( dummy::MULTI_PLUGIN ).unwrap().interface_names().collect();
	assert_eq!( declared, [ "dummy::Setter", "dummy::DoubleGetter", "dummy::IntGetter" ]);
}

#[test]
fn unknown_class_lookup_is_empty() {
	assert!( dummy::registry().get( "dummy::Nonexistent" ).is_none() );
}

trait Marker { fn tag( &self ) -> u8 ; }
interface!( dyn Marker, "registry_contents::Marker" );

#[derive( Default )] struct First ;
impl Marker for First { fn tag( &self ) -> u8 { 1 } }

#[derive( Default )] struct Second ;
impl Marker for Second { fn tag( &self ) -> u8 { 2 } }

#[test]
fn duplicate_class_name_last_registration_wins() {

	let registry = PluginRegistry::from_iter([
		PluginRegistration::of( "demo::Clash", First::default )
			.implements::<dyn Marker>(| plugin | plugin )
			.finish(),
		PluginRegistration::of( "demo::Clash", Second::default )
			.implements::<dyn Marker>(| plugin | plugin )
			.finish(),
	]);
	assert_eq!( registry.len(), 1 );

	let plugin = dyn_link::Library::from_registry( registry )
		.instantiate( "demo::Clash" )
		.unwrap();
	let marker = plugin.interface::<dyn Marker>().unwrap();
	assert_eq!( marker.tag(), 2 );

}
