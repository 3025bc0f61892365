use crate::dummy ;

#[test]
fn named_lookup_agrees_with_the_typed_path() {

	let plugin = dummy::shared_library().instantiate( dummy::MULTI_PLUGIN ).unwrap();

	for name in [ "dummy::Setter", "dummy::DoubleGetter", "dummy::IntGetter" ] {
		assert!( plugin.interface_by_name( name ).is_some(), "missing {}", name );
		assert!( plugin.implements_name( name ));
	}

	assert!( plugin.interface_by_name( "dummy::NameGetter" ).is_none() );
	assert!( plugin.interface_by_name( "" ).is_none() );
	assert!( plugin.interface_by_name( "dummy::setter" ).is_none(), "name match must be exact" );

}
